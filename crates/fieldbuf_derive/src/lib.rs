use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derives `fieldbuf::Record` for a struct with named fields.
///
/// Struct attribute:
/// - `#[fieldbuf(name = "...")]` sets the record's type name (defaults to the struct name).
///
/// Field attributes:
/// - `#[fieldbuf(rename = "...")]` changes the name written on the wire.
/// - `#[fieldbuf(skip)]` leaves the field out of the stream.
/// - `#[fieldbuf(nested)]` writes a member that is itself a `Record` between markers.
///
/// Every other field must implement `fieldbuf::FieldValue`.
#[proc_macro_derive(Record, attributes(fieldbuf))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_record(input) {
        Ok(expanded) => expanded,
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_record(input: DeriveInput) -> syn::Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => &fields.named,
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "Record can only be derived for structs with named fields",
            ));
        }
    };

    let type_name = match record_name(&input)? {
        Some(name) => name.value(),
        None => struct_name.to_string(),
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let options = FieldOptions::parse(field)?;
        if options.skip {
            continue;
        }

        let Some(ident) = &field.ident else {
            continue;
        };
        let ty = &field.ty;
        let wire_name = match options.rename {
            Some(name) => name.value(),
            None => ident.to_string().trim_start_matches("r#").to_owned(),
        };

        let entry = if options.nested {
            quote! {
                ::fieldbuf::Field::new(
                    #wire_name,
                    ::fieldbuf::DataType::StartMarker,
                    |record: &Self, buffer: &mut ::fieldbuf::IoBuffer, name: &str| {
                        ::fieldbuf::encode_nested(buffer, name, &record.#ident)
                    },
                    |record: &mut Self, buffer: &mut ::fieldbuf::IoBuffer, header: &::fieldbuf::FieldHeader| {
                        ::fieldbuf::decode_nested(buffer, header, &mut record.#ident)
                    },
                )
            }
        } else {
            quote! {
                ::fieldbuf::Field::new(
                    #wire_name,
                    <#ty as ::fieldbuf::FieldValue>::DATA_TYPE,
                    |record: &Self, buffer: &mut ::fieldbuf::IoBuffer, name: &str| {
                        ::fieldbuf::FieldValue::write_field(&record.#ident, buffer, name)
                    },
                    |record: &mut Self, buffer: &mut ::fieldbuf::IoBuffer, header: &::fieldbuf::FieldHeader| {
                        ::fieldbuf::FieldValue::read_field(&mut record.#ident, buffer, header)
                    },
                )
            }
        };
        entries.push(entry);
    }

    let expanded = quote! {
        impl ::fieldbuf::Record for #struct_name {
            const TYPE_NAME: &'static str = #type_name;
            const FIELDS: &'static [::fieldbuf::Field<Self>] = &[#(#entries),*];
        }
    };

    Ok(TokenStream::from(expanded))
}

fn record_name(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut name = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("fieldbuf") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

#[derive(Default)]
struct FieldOptions {
    rename: Option<LitStr>,
    skip: bool,
    nested: bool,
}

impl FieldOptions {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("fieldbuf") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    options.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    options.skip = true;
                } else if meta.path.is_ident("nested") {
                    options.nested = true;
                } else {
                    return Err(meta.error("expected `rename`, `skip` or `nested`"));
                }
                Ok(())
            })?;
        }

        if options.skip && (options.nested || options.rename.is_some()) {
            return Err(syn::Error::new_spanned(
                field,
                "`skip` cannot be combined with `rename` or `nested`",
            ));
        }
        Ok(options)
    }
}
