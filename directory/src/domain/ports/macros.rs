//! Helper macro for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.

    define_port_error! {
        pub enum StorageProbeError {
            Unavailable => "storage unavailable",
            Rejected { key: String } => "rejected key {key}",
            Status { status: u16 } => "status {status}",
            Failed { key: String, status: u16 } => "{key} failed with {status}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StorageProbeError::unavailable(), StorageProbeError::Unavailable);
        assert_eq!(
            StorageProbeError::unavailable().to_string(),
            "storage unavailable"
        );
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StorageProbeError::rejected("user-favorites");
        assert_eq!(err.to_string(), "rejected key user-favorites");
    }

    #[test]
    fn constructors_preserve_numeric_fields() {
        let err = StorageProbeError::status(404_u16);
        assert_eq!(err, StorageProbeError::Status { status: 404 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StorageProbeError::failed("app-theme", 500_u16);
        assert_eq!(err.to_string(), "app-theme failed with 500");
    }
}
