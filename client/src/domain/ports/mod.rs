//! Driven ports the engine talks to.
//!
//! The domain owns the request and response contracts so the controller and
//! services stay adapter-agnostic: the directory port hides transport, the
//! address-bar port hides where the shareable representation lives.

pub mod address_bar;
pub mod employee_directory;

pub use self::address_bar::{AddressBar, InMemoryAddressBar};
pub use self::employee_directory::{
    EmployeeDirectory, EmployeeDirectoryError, FixtureEmployeeDirectory,
};

#[cfg(test)]
pub use self::employee_directory::MockEmployeeDirectory;
