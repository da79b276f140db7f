//! Saving and restoring classifiers.
//!
//! A whole classifier is stored as one JSON document. Single classes can also
//! be written to and read from their own files, named after the class, inside
//! a caller-chosen directory.

mod class_files;
mod codec;

pub(crate) use codec::json_error;
