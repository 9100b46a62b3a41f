//! Defines helper macros for generating domain port error enums.

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
    //! Regression coverage for this module.
    use crate::domain::ports::SocialGraphSinkError;

    define_port_error! {
        pub enum StagePortError {
            Closed => "sink closed",
            Rejected { message: String } => "rejected: {message}",
            Partial { message: String, count: u32 } => "partial: {message} ({count})",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StagePortError::rejected("hello");
        assert_eq!(err.to_string(), "rejected: hello");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StagePortError::closed(), StagePortError::Closed);
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StagePortError::partial("likes", 42_u32);
        assert_eq!(err.to_string(), "partial: likes (42)");
    }

    #[test]
    fn sink_errors_carry_their_message() {
        let err = SocialGraphSinkError::foreign_key_violation("likes.target_id");
        assert_eq!(
            err.to_string(),
            "social graph sink rejected a dangling reference: likes.target_id"
        );
    }
}
