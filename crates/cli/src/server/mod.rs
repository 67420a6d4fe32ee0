mod signal;

pub use signal::wait_for_shutdown;
