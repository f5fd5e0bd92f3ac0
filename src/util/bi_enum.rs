/// Defines an enum over a primitive repr together with the conversions in
/// both directions.
macro_rules! bi_enum {
  (
    #[repr($uN:ident)]
    $(#[$attr:meta])*
    $vis:vis enum $Ty:ident {
      $($(#[$var_attr:meta])* $Variant:ident = $value:literal,)*
    }
  ) => {
    $(#[$attr])*
    #[repr($uN)]
    $vis enum $Ty { $($(#[$var_attr])* $Variant = $value,)* }

    impl TryFrom<$uN> for $Ty {
      type Error = ();
      fn try_from(value: $uN) -> Result<Self, Self::Error> {
        Ok(match value {
          $($value => $Ty::$Variant,)*
          _ => Err(())?,
        })
      }
    }

    impl $Ty {
      /// # Safety
      /// `value` must be the discriminant of a variant.
      pub unsafe fn from_unchecked(value: $uN) -> $Ty {
        Self::try_from(value).unwrap_unchecked()
      }
    }

    impl From<$Ty> for $uN {
      fn from(value: $Ty) -> Self {
        value as Self
      }
    }
  };
}

pub(crate) use bi_enum;
