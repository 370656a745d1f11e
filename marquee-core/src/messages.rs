//! Common message texts
//!
//! All fit in one payload line.

/// First line of the start-up record
pub const PROG_START: &str = "Prog start";

/// Network connecting notice
pub const WIFI_CONNECTING: &str = "WIFI ct";

/// Fixed top row of the device IP style
pub const DEVICE_IP_LABEL: &str = "Device IP:";

/// Greeting
pub const HELLO: &str = "Hello";

/// Waiting for network address
pub const WAIT_FOR_IP: &str = "wait forIP";
