use syn::{Attribute, Error, ExprArray, ExprPath, LitStr};

pub struct FieldAttributes {
    pub name: Option<LitStr>,
    pub ignore: bool,
}

impl TryFrom<&Attribute> for FieldAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut name: Option<LitStr> = None;
        let mut ignore = false;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("ignore") {
                ignore = true;
            } else {
                return Err(meta.error("unsupported bean field attribute"));
            }

            Ok(())
        })?;

        Ok(Self { name, ignore })
    }
}

pub struct BeanAttributes {
    pub names: Option<ExprArray>,
    pub constructor: Option<ExprPath>,
}

impl TryFrom<&Attribute> for BeanAttributes {
    type Error = Error;

    fn try_from(value: &Attribute) -> Result<Self, Self::Error> {
        let mut names: Option<ExprArray> = None;
        let mut constructor: Option<ExprPath> = None;
        value.parse_nested_meta(|meta| {
            if meta.path.is_ident("names") {
                names = Some(meta.value().and_then(|value| value.parse())?);
            } else if meta.path.is_ident("constructor") {
                let expr: LitStr = meta.value()?.parse()?;
                constructor = Some(expr.parse()?);
            } else {
                return Err(meta.error("unsupported bean attribute"));
            }

            Ok(())
        })?;

        Ok(Self { names, constructor })
    }
}
