// Core modules implementing storage, timestamps, export rendering, and error modeling.
pub mod clock;
pub mod error;
pub mod export;
pub mod store;
