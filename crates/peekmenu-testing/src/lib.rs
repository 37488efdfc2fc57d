//! Testing utilities and harness for Peekmenu

mod fake_host;
mod testing;

pub use fake_host::FakeHost;
pub use testing::*;

pub mod prelude {
    pub use crate::fake_host::FakeHost;
    pub use crate::testing::*;
}
