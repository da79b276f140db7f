pub mod bayes;
mod class;
mod error;

pub use class::Class;
pub use error::ClassifierError;
