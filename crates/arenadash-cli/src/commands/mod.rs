pub mod round;
pub mod watch;
