use crate::attributes::{BeanAttributes, FieldAttributes};
use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Error, Expr, ExprArray, ExprLit, Field, Fields,
    FieldsNamed, GenericArgument, Lit, PathArguments, Result, Type,
};

const BEAN: &str = "bean";

const INSTANCE_POINTERS: [&str; 3] = ["BeanInstancePtr", "Arc", "Rc"];

enum FieldKind {
    Literal,
    OptionalLiteral,
    Reference,
}

fn last_segment_argument<'a>(ty: &'a Type, ident: &str) -> Option<&'a Type> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if segment.ident != ident {
        return None;
    }

    if let PathArguments::AngleBracketed(arguments) = &segment.arguments {
        arguments.args.iter().find_map(|argument| {
            if let GenericArgument::Type(ty) = argument {
                Some(ty)
            } else {
                None
            }
        })
    } else {
        None
    }
}

fn is_instance_pointer(ty: &Type) -> bool {
    INSTANCE_POINTERS
        .iter()
        .any(|pointer| last_segment_argument(ty, pointer).is_some())
}

fn classify_field(field: &Field) -> Result<FieldKind> {
    if is_instance_pointer(&field.ty) {
        return Err(Error::new(
            field.ty.span(),
            "Bean references must be declared as Option<BeanInstancePtr<T>>!",
        ));
    }

    Ok(match last_segment_argument(&field.ty, "Option") {
        Some(inner) if is_instance_pointer(inner) => FieldKind::Reference,
        Some(_) => FieldKind::OptionalLiteral,
        None => FieldKind::Literal,
    })
}

fn extract_field_attributes(field: &Field) -> Result<Option<FieldAttributes>> {
    extract_attributes(&field.attrs)
}

fn extract_attributes<T: for<'a> TryFrom<&'a Attribute, Error = Error>>(
    attributes: &[Attribute],
) -> Result<Option<T>> {
    attributes
        .iter()
        .filter_map(|attribute| {
            if attribute.path().is_ident(BEAN) {
                Some(T::try_from(attribute))
            } else {
                None
            }
        })
        .next()
        .transpose()
}

fn generate_setter(ident: &Ident, field: &Field) -> Result<Option<TokenStream>> {
    let attributes = extract_field_attributes(field)?;
    if attributes.as_ref().map(|attributes| attributes.ignore) == Some(true) {
        return Ok(None);
    }

    let field_ident = field
        .ident
        .as_ref()
        .ok_or_else(|| Error::new(field.span(), "Missing field identifier!"))?;

    let name = attributes
        .and_then(|attributes| attributes.name)
        .map(|name| name.value())
        .unwrap_or_else(|| field_ident.to_string());

    let (kind, assign) = match classify_field(field)? {
        FieldKind::Literal => (
            quote!(springtime_beans::bean::PropertyKind::Literal),
            quote!(springtime_beans::bean::assign_literal),
        ),
        FieldKind::OptionalLiteral => (
            quote!(springtime_beans::bean::PropertyKind::Literal),
            quote!(springtime_beans::bean::assign_optional_literal),
        ),
        FieldKind::Reference => (
            quote!(springtime_beans::bean::PropertyKind::Reference),
            quote!(springtime_beans::bean::assign_reference),
        ),
    };

    Ok(Some(quote! {
        springtime_beans::bean::PropertySetter::<#ident> {
            name: #name,
            kind: #kind,
            assign: |target, value| #assign(&mut target.#field_ident, value),
        }
    }))
}

fn generate_setters(ident: &Ident, fields: &FieldsNamed) -> Result<Vec<TokenStream>> {
    let setters: Vec<Option<TokenStream>> = fields
        .named
        .iter()
        .map(|field| generate_setter(ident, field))
        .try_collect()?;

    Ok(setters.into_iter().flatten().collect())
}

fn generate_names(attribute_names: Option<ExprArray>, ident: &Ident) -> TokenStream {
    match attribute_names {
        Some(names) => {
            let names = names
                .elems
                .iter()
                .filter_map(|elem| {
                    if let Expr::Lit(ExprLit {
                        lit: Lit::Str(string),
                        ..
                    }) = elem
                    {
                        Some(string.value())
                    } else {
                        None
                    }
                })
                .collect_vec();

            quote!(vec![#(#names.to_string()),*])
        }
        None => {
            let ident = ident.to_string();
            quote!(vec![concat!(module_path!(), "::", #ident).to_string()])
        }
    }
}

pub fn expand_bean(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Generic beans are not supported!",
        ));
    }

    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new(input.span(), "Can only derive Bean on structs!"));
    };

    let ident = &input.ident;
    let setters = match fields {
        Fields::Named(fields) => generate_setters(ident, fields)?,
        Fields::Unit => vec![],
        Fields::Unnamed(_) => {
            return Err(Error::new(
                fields.span(),
                "Can only derive Bean on structs with named fields!",
            ))
        }
    };

    let attributes = extract_attributes::<BeanAttributes>(&input.attrs)?;
    let (names, constructor) = attributes
        .map(|attributes| (attributes.names, attributes.constructor))
        .unwrap_or_default();

    let names = generate_names(names, ident);
    let creation = match constructor {
        Some(constructor) => quote!(#constructor()),
        None => quote!(Ok(<Self as std::default::Default>::default())),
    };

    Ok(quote! {
        #[automatically_derived]
        impl springtime_beans::bean::Bean for #ident {
            fn create() -> Result<Self, springtime_beans::instance::ErrorPtr> {
                #creation
            }

            fn property_setters() -> &'static [springtime_beans::bean::PropertySetter<Self>] {
                const SETTERS: &[springtime_beans::bean::PropertySetter<#ident>] = &[#(#setters),*];
                SETTERS
            }
        }

        const _: () = {
            fn register() -> springtime_beans::type_registry::BeanTypeDefinition {
                springtime_beans::type_registry::BeanTypeDefinition {
                    names: #names,
                    rust_type_name: std::any::type_name::<#ident>(),
                    type_id: std::any::TypeId::of::<#ident>(),
                    factory: springtime_beans::type_registry::internal::create_bean_object::<#ident>,
                }
            }

            springtime_beans::type_registry::internal::submit! {
                springtime_beans::type_registry::internal::BeanTypeRegisterer {
                    register
                }
            };
        };
    })
}
