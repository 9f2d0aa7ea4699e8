/// The counterpart of [`Option::inspect`] for the `None` case, mostly useful for logging
/// a failed lookup without breaking up a method chain.
pub trait InspectNone {
    fn inspect_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> InspectNone for Option<T> {
    fn inspect_none<F: FnOnce()>(self, f: F) -> Self {
        if let Some(value) = self {
            Some(value)
        } else {
            f();
            None
        }
    }
}


#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::InspectNone;


    #[test]
    fn runs_only_on_none() {
        let calls = Cell::new(0_u32);

        assert_eq!(Some(3).inspect_none(|| calls.set(calls.get() + 1)), Some(3));
        assert_eq!(calls.get(), 0);

        assert_eq!(None::<u8>.inspect_none(|| calls.set(calls.get() + 1)), None);
        assert_eq!(calls.get(), 1);
    }
}
