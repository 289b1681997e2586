mod activation;
mod dense;
mod embed;
mod weights;

pub use activation::Sigmoid;
pub use dense::project;
pub use embed::embed_into;
pub use weights::Weights;
