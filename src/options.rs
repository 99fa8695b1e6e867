/// Display options for [`Dumper`](crate::Dumper).
///
/// *Note: these options may be set directly, but the
/// [`DumpOptionsBuilder`] trait provides a more convenient way to fluently
/// build options off of a default or a known base set.*
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Maximum number of bytes to dump. `None` dumps the whole input.
    ///
    /// ```rust
    /// use hexcat::{AsDump, options::DumpOptionsBuilder};
    ///
    /// let v = vec![0u8; 64];
    ///
    /// let dump = v.dump().limit(16).dump_to::<String>().unwrap();
    /// assert_eq!(dump.lines().count(), 1);
    ///
    /// let dump = v.dump().unlimited().dump_to::<String>().unwrap();
    /// assert_eq!(dump.lines().count(), 4);
    /// ```
    ///
    /// A limit of `Some(0)` produces no rows at all.
    pub limit: Option<u64>,
}

impl DumpOptions {
    /// Return a new instance which dumps the whole input.
    pub fn unlimited() -> Self {
        Self { limit: None }
    }

    /// Return a new instance which dumps at most `limit` bytes.
    pub fn limited(limit: u64) -> Self {
        Self { limit: Some(limit) }
    }
}

/// This provides a fluent API to configure options over any type
/// which holds a [`DumpOptions`] instance.
pub trait DumpOptionsBuilder: Sized {
    /// Return a new instance of `Self` with the mapping function applied
    /// to the instance's options.
    fn map_options<F: FnOnce(DumpOptions) -> DumpOptions>(self, f: F) -> Self;

    /// Return a new instance of `Self` with the given options.
    fn with_options(self, o: DumpOptions) -> Self {
        self.map_options(|_| o)
    }

    /// Dump at most `limit` bytes.
    /// This is equivalent to setting the value of the
    /// [`limit`](DumpOptions::limit) field.
    fn limit(self, limit: u64) -> Self {
        self.map_options(|mut o| {
            o.limit = Some(limit);
            o
        })
    }

    /// Set or clear the byte limit from an `Option`.
    fn maybe_limit(self, limit: Option<u64>) -> Self {
        self.map_options(|mut o| {
            o.limit = limit;
            o
        })
    }

    /// Dump the whole input.
    /// This clears the value of the [`limit`](DumpOptions::limit) field.
    fn unlimited(self) -> Self {
        self.map_options(|mut o| {
            o.limit = None;
            o
        })
    }
}

impl DumpOptionsBuilder for DumpOptions {
    fn map_options<F: FnOnce(DumpOptions) -> DumpOptions>(self, f: F) -> Self {
        f(self)
    }
}
