//! `define_port_error!`: error enums for driven ports.
//!
//! Each variant names its display message inline and gets a snake_case
//! constructor whose arguments accept anything convertible into the field
//! type, so adapters can write `ParcelRepositoryError::query("lock poisoned")`
//! instead of spelling out the struct variant.

macro_rules! define_port_error {
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

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Construct [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum LedgerError {
            Offline => "ledger offline",
            Rejected { parcel_id: String } => "parcel {parcel_id} rejected",
            Stale { parcel_id: String, version: u32 } => "{parcel_id} stale at v{version}",
        }
    }

    #[rstest]
    #[case(LedgerError::offline(), "ledger offline")]
    #[case(LedgerError::rejected("parcel-abc1234"), "parcel parcel-abc1234 rejected")]
    #[case(LedgerError::stale("parcel-abc1234", 3_u32), "parcel-abc1234 stale at v3")]
    fn constructors_render_their_messages(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn constructors_build_the_matching_variant() {
        assert_eq!(
            LedgerError::stale(String::from("parcel-x"), 1_u32),
            LedgerError::Stale {
                parcel_id: "parcel-x".to_owned(),
                version: 1
            }
        );
    }
}
