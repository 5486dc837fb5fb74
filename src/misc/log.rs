/*!
Miscellaneous items related to [logging](log).

Calls to the log macros are made at a handful of points of interest in a
search, mostly at trace level.

Note, no log implementation is provided.
For details, see [log].
*/

/// Targets to be used within a [log] macro.
pub mod targets {
    pub const SEARCH: &str = "search";
    pub const PROPAGATION: &str = "propagation";
    pub const NOGOODS: &str = "nogoods";
    pub const ORDERING: &str = "ordering";
    pub const MODEL: &str = "model";
}
