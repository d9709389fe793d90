pub mod common {
    tonic::include_proto!("meal4you.common");
}

pub mod recommender_service {
    tonic::include_proto!("meal4you.recommender_service");
}
