//! Helper macro generating port error enums.
//!
//! Each variant declares its display message; the macro derives
//! `thiserror::Error`, emits a snake_case constructor per variant that
//! accepts `impl Into<T>` for every field, and a `kind()` accessor used as a
//! structured log field.

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

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

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

            /// Snake-case variant name for structured logging.
            pub fn kind(&self) -> &'static str {
                ::paste::paste! {
                    match self {
                        $(
                            define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                                stringify!([<$variant:snake>]),
                        )*
                    }
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Connection { message: String } => "connection failed: {message}",
            DuplicateSlug { slug: String } => "slug {slug} already exists",
            Limit { max: u32 } => "limit {max} exceeded",
            Missing => "record missing",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::duplicate_slug("happy");
        assert_eq!(err.to_string(), "slug happy already exists");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::limit(10_u32);
        assert_eq!(err.to_string(), "limit 10 exceeded");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExamplePortError::missing(), ExamplePortError::Missing);
    }

    #[test]
    fn kind_reports_snake_case_variant_names() {
        assert_eq!(ExamplePortError::connection("down").kind(), "connection");
        assert_eq!(ExamplePortError::duplicate_slug("x").kind(), "duplicate_slug");
        assert_eq!(ExamplePortError::Missing.kind(), "missing");
    }
}
