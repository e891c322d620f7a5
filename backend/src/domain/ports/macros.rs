//! Helper macro for declaring port error enums.
//!
//! Every variant gets a snake_case constructor taking `impl Into` arguments,
//! so adapters can write `UserPersistenceError::query(err.to_string())`.
//! Fields present on every variant can be listed in a trailing
//! `shared { field: Type }` block to generate a borrowing accessor; listing
//! a field that some variant lacks is a compile error.

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

    (@shared [$($variant:ident)*]) => {};

    (@shared [$($variant:ident)*] $field:ident : $ty:ty $(, $rest:ident : $rest_ty:ty)*) => {
        pub fn $field(&self) -> &$ty {
            match self {
                $( Self::$variant { $field, .. } => $field, )*
            }
        }

        define_port_error!(@shared [$($variant)*] $($rest : $rest_ty),*);
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
        $( shared { $($shared:ident : $shared_ty:ty),+ $(,)? } )?
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

            define_port_error!(@shared [$($variant)*] $($($shared : $shared_ty),+)?);
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum LookupPortError {
            Unreachable => "store unreachable",
            Missing { name: String } => "missing record: {name}",
            Window { name: String, limit: u64 } => "bad window for {name} (limit {limit})",
        }
    }

    define_port_error! {
        pub enum TaggedPortError {
            Rejected { tag: String, limit: u64 } => "rejected {tag}",
            Expired { tag: String, limit: u64, age: u64 } => "expired {tag} after {age}",
        }
        shared { tag: str, limit: u64 }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(LookupPortError::unreachable().to_string(), "store unreachable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = LookupPortError::missing("ada");
        assert_eq!(err, LookupPortError::Missing { name: "ada".to_owned() });
        assert_eq!(err.to_string(), "missing record: ada");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = LookupPortError::window("users", 10_u64);
        assert_eq!(err.to_string(), "bad window for users (limit 10)");
    }

    #[test]
    fn shared_fields_get_accessors_on_every_variant() {
        let rejected = TaggedPortError::rejected("users.html", 3_u64);
        let expired = TaggedPortError::expired("user.html", 5_u64, 60_u64);

        assert_eq!(rejected.tag(), "users.html");
        assert_eq!(*rejected.limit(), 3);
        assert_eq!(expired.tag(), "user.html");
        assert_eq!(*expired.limit(), 5);
    }
}
