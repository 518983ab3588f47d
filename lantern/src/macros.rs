// Thin wrappers so every log line is routed through the crate's fern dispatch with the
// caller's module as the target.

#[macro_export]
macro_rules! lantern_error {
    ($($arg:tt)+) => {
        $crate::log::error!($($arg)+)
    };
}

#[macro_export]
macro_rules! lantern_warn {
    ($($arg:tt)+) => {
        $crate::log::warn!($($arg)+)
    };
}

#[macro_export]
macro_rules! lantern_info {
    ($($arg:tt)+) => {
        $crate::log::info!($($arg)+)
    };
}

#[macro_export]
macro_rules! lantern_debug {
    ($($arg:tt)+) => {
        $crate::log::debug!($($arg)+)
    };
}

#[macro_export]
macro_rules! lantern_trace {
    ($($arg:tt)+) => {
        $crate::log::trace!($($arg)+)
    };
}
