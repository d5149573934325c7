pub mod car;
pub mod envelope;

pub use car::{Car, CarDocument, CarPage, CarPatch, NewCar};
pub use envelope::{Envelope, ErrorBody};
