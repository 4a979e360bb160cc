//! Helper macro for declaring port error enums.
//!
//! Each variant becomes a `thiserror` variant with the given message and a
//! snake_case constructor accepting `impl Into<T>` for every field, so
//! adapters can write `UserPersistenceError::query("boom")`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for the generated constructors.
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "sample connection failed: {message}",
            Stale { expected: u32, actual: u32 } => "stale row: expected {expected}, found {actual}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::connection("refused");
        assert_eq!(err.to_string(), "sample connection failed: refused");
    }

    #[test]
    fn constructors_support_multiple_fields() {
        let err = SamplePortError::stale(1_u32, 3_u32);
        assert_eq!(err.to_string(), "stale row: expected 1, found 3");
        assert_eq!(
            err,
            SamplePortError::Stale {
                expected: 1,
                actual: 3
            }
        );
    }
}
