//! Positioned token classification for SQL embedded in host source files.
//!
//! [`Parser`] lexes a SQL string, walks every statement it contains and yields
//! [`Token`]s carrying the row / column at which each token starts, relative to
//! the column the SQL began at in its host file. Style rules use the role
//! predicates on [`Token`] (`is_root_keyword`, `is_function_name`, ...) to
//! decide what to check and the position to report.

reexport!(testing, test);
reexport!(config);
reexport!(error);
reexport!(sql);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        pub mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
