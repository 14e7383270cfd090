pub mod hasher;

pub use hasher::CredentialHasher;
