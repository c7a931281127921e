pub mod descriptors;
pub mod helpers;
pub mod printing;
pub mod streams;
