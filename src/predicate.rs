use std::any::Any;

/// True only when the value is a `bool` itself. Wrappers such as `Box<bool>`
/// or `Option<bool>`, numbers and strings are not booleans.
pub fn is_boolean(value: &dyn Any) -> bool {
    value.is::<bool>()
}

/// Narrows an unknown value to `bool` when [`is_boolean`] holds.
pub fn as_boolean(value: &dyn Any) -> Option<bool> {
    value.downcast_ref::<bool>().copied()
}
