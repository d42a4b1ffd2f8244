mod hashed_tf;

pub use hashed_tf::HashedTfEmbedder;
