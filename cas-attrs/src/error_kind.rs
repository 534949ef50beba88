use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    Attribute,
    Expr,
    Fields,
    Ident,
    ItemStruct,
    Result,
    Token,
};

/// A single `tag = expr` argument of the `error` attribute.
struct ErrorArg {
    tag: Ident,
    value: Expr,
}

impl Parse for ErrorArg {
    fn parse(input: ParseStream) -> Result<Self> {
        let tag = input.parse()?;
        input.parse::<Token![=]>()?;
        Ok(Self { tag, value: input.parse()? })
    }
}

/// The arguments that can be passed to the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
    pub note: Option<Expr>,
}

impl Parse for ErrorArgs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut args = ErrorArgs::default();

        for ErrorArg { tag, value } in Punctuated::<ErrorArg, Token![,]>::parse_terminated(input)? {
            let slot = match tag.to_string().as_str() {
                "message" => &mut args.message,
                "labels" => &mut args.labels,
                "help" => &mut args.help,
                "note" => &mut args.note,
                other => return Err(syn::Error::new_spanned(&tag, format!("unknown tag `{}`", other))),
            };
            if slot.replace(value).is_some() {
                return Err(syn::Error::new_spanned(&tag, format!("duplicate tag `{}`", tag)));
            }
        }

        Ok(args)
    }
}

/// Converts a struct name like `UnexpectedEof` into a message like `unexpected eof`, used when no
/// `message` tag is given.
fn default_message(name: &Ident) -> String {
    let mut message = String::new();
    for c in name.to_string().chars() {
        if c.is_uppercase() && !message.is_empty() {
            message.push(' ');
        }
        message.extend(c.to_lowercase());
    }
    message
}

/// Creates a `let` expression that destructures `self` into its named fields. Returns a compile
/// error if the fields are not named.
fn destructure_fields(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let fields = fields.named.iter().map(|field| {
                let field_name = field.ident.as_ref();
                quote! { #field_name }
            });
            quote! { let #ident { #(#fields),* } = self; }
        },
        Fields::Unnamed(_) => quote_spanned! { ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs"); },
        Fields::Unit => quote! {},
    }
}

/// The target struct to derive `ErrorKind` for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl Parse for ErrorKindTarget {
    fn parse(input: ParseStream) -> Result<Self> {
        // parse outer attributes, including documentation and `error` attributes
        let attributes = input.call(Attribute::parse_outer)?;
        let remaining = input.parse::<ItemStruct>()?;

        let name = remaining.ident;
        let fields = remaining.fields;
        let mut error_attrs = attributes.iter().filter(|attr| attr.path().is_ident("error"));
        let error_args = match error_attrs.next() {
            Some(attr) => attr.parse_args::<ErrorArgs>()?,
            None => ErrorArgs::default(),
        };
        if let Some(extra) = error_attrs.next() {
            return Err(syn::Error::new_spanned(extra, "only one `error` attribute is allowed"));
        }

        Ok(ErrorKindTarget {
            name,
            fields,
            error_args,
        })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let destructure_expr = destructure_fields(&self.name, &self.fields);
        let message = match &self.error_args.message {
            Some(message) => quote! { #message },
            None => {
                let message = default_message(&self.name);
                quote! { #message }
            },
        };
        let labels = self.error_args.labels.as_ref()
            .map(|e| quote! { #e })
            .unwrap_or_else(|| quote! { [""] });
        let help = self.error_args.help.as_ref().map(|e| quote! { builder.set_help(#e); });
        let note = self.error_args.note.as_ref().map(|e| quote! { builder.set_note(#e); });

        tokens.extend(quote! {
            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #[allow(unused_variables)]
                #destructure_expr

                let first = spans.first().cloned().unwrap_or(0..0);
                let mut builder = ariadne::Report::build(ariadne::ReportKind::Error, src_id, first.start)
                    .with_message(#message)
                    .with_labels(
                        #labels
                            .into_iter()
                            .enumerate()
                            .map(|(i, label_str)| {
                                let span = spans.get(i).cloned().unwrap_or_else(|| first.clone());
                                let mut label = ariadne::Label::new((src_id, span))
                                    .with_color(cas_error::EXPR);

                                if !label_str.is_empty() {
                                    label = label.with_message(label_str);
                                }

                                label
                            })
                            .collect::<Vec<_>>()
                    );

                #help
                #note
                builder.finish()
            }
        });
    }
}
