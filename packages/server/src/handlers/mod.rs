pub mod fhe;
pub mod hackathon;
pub mod judging;
pub mod submission;
