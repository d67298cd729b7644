pub(crate) const GREEN_CHECK: &str = "\u{2705}";
pub(crate) const RED_X: &str = "\u{274c}";
pub(crate) const PENCIL: &str = "\u{270f}\u{fe0f}";
