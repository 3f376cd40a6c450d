use syn::{Attribute, Error, ExprArray, ExprPath, LitStr, Meta};

pub struct AutowireAttributes {
    pub key: Option<LitStr>,
    pub args: Option<ExprArray>,
}

impl TryFrom<&Attribute> for AutowireAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut key = None;
        let mut args = None;

        // bare #[autowire]
        if let Meta::Path(_) = value.meta {
            return Ok(Self { key, args });
        }

        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("key") {
                key = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("args") {
                args = Some(meta.value()?.parse()?);
            } else {
                return Err(meta.error("Unsupported autowire attribute!"));
            }

            Ok(())
        })?;

        Ok(Self { key, args })
    }
}

pub struct InjectableAttributes {
    pub constructor: Option<ExprPath>,
}

impl TryFrom<&Attribute> for InjectableAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut constructor = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("constructor") {
                let path: LitStr = meta.value()?.parse()?;
                constructor = Some(path.parse()?);
            } else {
                return Err(meta.error("Unsupported injectable attribute!"));
            }

            Ok(())
        })?;

        Ok(Self { constructor })
    }
}
