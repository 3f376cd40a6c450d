use crate::attributes::{AutowireAttributes, InjectableAttributes};
use itertools::Itertools;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DataStruct, DeriveInput, Error, Expr, ExprArray, ExprLit, ExprUnary, Fields,
    Index, Lit, LitFloat, Member, Result, Type, UnOp,
};

const AUTOWIRE: &str = "autowire";
const INJECTABLE: &str = "injectable";

struct Parameter<'a> {
    name: String,
    member: Member,
    ty: &'a Type,
}

fn extract_parameters(fields: &Fields) -> Vec<Parameter> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| match &field.ident {
            Some(ident) => Parameter {
                name: ident.unraw().to_string(),
                member: Member::Named(ident.clone()),
                ty: &field.ty,
            },
            None => Parameter {
                name: index.to_string(),
                member: Member::Unnamed(Index::from(index)),
                ty: &field.ty,
            },
        })
        .collect()
}

fn extract_attributes<'a, T>(attributes: &'a [Attribute], name: &str) -> Result<Option<T>>
where
    T: TryFrom<&'a Attribute, Error = Error>,
{
    attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident(name))
        .map(T::try_from)
        .next()
        .transpose()
}

fn parse_float(value: &LitFloat) -> Result<f64> {
    let parsed = value.base10_parse::<f64>()?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(Error::new(value.span(), "Float literal out of range!"))
    }
}

fn negated_literal(expr: &Expr) -> Result<TokenStream> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(value),
            ..
        }) => {
            let value = value.base10_parse::<i64>()?;
            Ok(quote!(autowire_di::value::Value::Integer(-#value)))
        }
        Expr::Lit(ExprLit {
            lit: Lit::Float(value),
            ..
        }) => {
            let value = parse_float(value)?;
            Ok(quote!(autowire_di::value::Value::Float(-#value)))
        }
        _ => Err(Error::new(expr.span(), "Only numbers can be negated!")),
    }
}

fn literal_value(expr: &Expr) -> Result<TokenStream> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(value) => Ok(quote!(autowire_di::value::Value::Text(#value.to_string()))),
            Lit::Int(value) => {
                let value = value.base10_parse::<i64>()?;
                Ok(quote!(autowire_di::value::Value::Integer(#value)))
            }
            Lit::Float(value) => {
                let value = parse_float(value)?;
                Ok(quote!(autowire_di::value::Value::Float(#value)))
            }
            Lit::Bool(value) => {
                let value = value.value;
                Ok(quote!(autowire_di::value::Value::Boolean(#value)))
            }
            _ => Err(Error::new(lit.span(), "Unsupported literal argument!")),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr,
            ..
        }) => negated_literal(expr),
        Expr::Array(array) => {
            let values = literal_values(array)?;
            Ok(quote!(autowire_di::value::Value::List(vec![#(#values),*])))
        }
        _ => Err(Error::new(
            expr.span(),
            "Literal arguments can only contain literals and arrays!",
        )),
    }
}

fn literal_values(array: &ExprArray) -> Result<Vec<TokenStream>> {
    array.elems.iter().map(literal_value).try_collect()
}

fn generate_descriptor(attributes: Option<AutowireAttributes>) -> Result<TokenStream> {
    let Some(AutowireAttributes { key, args }) = attributes else {
        return Ok(quote!(None));
    };

    let explicit_key = match key {
        Some(key) => quote!(Some(#key.to_string())),
        None => quote!(None),
    };

    let literal_arguments = match args {
        Some(args) => {
            let values = literal_values(&args)?;
            quote!(Some(vec![#(#values),*]))
        }
        None => quote!(None),
    };

    Ok(quote! {
        Some(autowire_di::metadata::AutowireDescriptor {
            explicit_key: #explicit_key,
            literal_arguments: #literal_arguments,
        })
    })
}

fn generate_construction(
    ident: &Ident,
    parameters: &[Parameter],
    attributes: Option<InjectableAttributes>,
) -> TokenStream {
    let values = parameters
        .iter()
        .map(|Parameter { name, .. }| {
            quote! {
                autowire_di::instance::FromInstance::from_instance(arguments.take()?, #name)?
            }
        })
        .collect_vec();

    if let Some(InjectableAttributes {
        constructor: Some(constructor),
    }) = attributes
    {
        return quote!(#constructor(#(#values),*));
    }

    let members = parameters.iter().map(|parameter| &parameter.member);
    quote! {
        #ident {
            #(#members: #values),*
        }
    }
}

pub fn expand_injectable(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new(
            input.span(),
            "Can only derive Injectable on structs!",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Cannot derive Injectable for generic structs!",
        ));
    }

    let ident = &input.ident;
    let parameters = extract_parameters(fields);
    let parameter_count = parameters.len();

    let descriptor = generate_descriptor(extract_attributes(&input.attrs, AUTOWIRE)?)?;
    let construction = generate_construction(
        ident,
        &parameters,
        extract_attributes(&input.attrs, INJECTABLE)?,
    );

    let names = parameters.iter().map(|parameter| &parameter.name);
    let types = parameters.iter().map(|parameter| parameter.ty);

    let (instantiate_function, instantiate) = if parameters.is_empty() {
        (
            quote! {
                fn instantiate() -> autowire_di::instance::InstancePtr {
                    autowire_di::instance::instance(#ident {})
                }
            },
            quote!(Some(instantiate)),
        )
    } else {
        (quote!(), quote!(None))
    };

    Ok(quote! {
        #[automatically_derived]
        impl autowire_di::metadata::Injectable for #ident {
            fn reflect() -> autowire_di::metadata::ReflectedType {
                fn construct(
                    arguments: Vec<autowire_di::instance::InstancePtr>,
                ) -> Result<autowire_di::instance::InstancePtr, autowire_di::ContainerError> {
                    #[allow(unused_mut, unused_variables)]
                    let mut arguments = autowire_di::metadata::internal::Arguments::new(
                        std::any::type_name::<#ident>(),
                        #parameter_count,
                        arguments,
                    )?;

                    Ok(autowire_di::instance::instance(#construction))
                }

                #instantiate_function

                autowire_di::metadata::ReflectedType {
                    type_name: std::any::type_name::<#ident>(),
                    module_path: module_path!(),
                    source_file: file!(),
                    manifest_dir: env!("CARGO_MANIFEST_DIR"),
                    parameters: vec![
                        #(autowire_di::metadata::ConstructorParameter {
                            name: #names,
                            type_name: std::any::type_name::<#types>(),
                        }),*
                    ],
                    autowire: #descriptor,
                    constructor: construct,
                    instantiate: #instantiate,
                }
            }
        }

        const _: () = {
            fn register() -> autowire_di::metadata::ReflectedType {
                <#ident as autowire_di::metadata::Injectable>::reflect()
            }

            autowire_di::metadata::internal::submit! {
                autowire_di::metadata::internal::ReflectedTypeRegisterer {
                    register
                }
            };
        };
    })
}
