//! Record derive macro implementation.

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Case conventions accepted by `rename_all`.
#[derive(Clone, Copy)]
enum RenameRule {
	Pascal,
	Camel,
	Snake,
	ScreamingSnake,
	Kebab,
}

impl RenameRule {
	fn parse(lit: &LitStr) -> syn::Result<Self> {
		match lit.value().as_str() {
			"PascalCase" => Ok(Self::Pascal),
			"camelCase" => Ok(Self::Camel),
			"snake_case" => Ok(Self::Snake),
			"SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
			"kebab-case" => Ok(Self::Kebab),
			other => Err(syn::Error::new_spanned(
				lit,
				format!(
					"unknown rename_all rule {other:?}. Supported: PascalCase, camelCase, snake_case, SCREAMING_SNAKE_CASE, kebab-case"
				),
			)),
		}
	}

	fn apply(self, name: &str) -> String {
		match self {
			Self::Pascal => name.to_upper_camel_case(),
			Self::Camel => name.to_lower_camel_case(),
			Self::Snake => name.to_snake_case(),
			Self::ScreamingSnake => name.to_shouty_snake_case(),
			Self::Kebab => name.to_kebab_case(),
		}
	}
}

/// One non-skipped field, ready for code generation.
struct FieldDef {
	ident: syn::Ident,
	ty: syn::Type,
	name: String,
	rules: String,
	transforms: String,
	readonly: bool,
}

#[derive(Default)]
struct FieldOptions {
	rename: Option<String>,
	skip: bool,
	readonly: bool,
}

/// Entry point for the `#[derive(Record)]` macro.
pub fn derive_record(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input)
		.unwrap_or_else(syn::Error::into_compile_error)
		.into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
	let Data::Struct(data) = &input.data else {
		return Err(syn::Error::new_spanned(
			input,
			"Record can only be derived for structs",
		));
	};
	let Fields::Named(named) = &data.fields else {
		return Err(syn::Error::new_spanned(
			&data.fields,
			"Record requires named fields",
		));
	};

	let rename_all = container_options(&input.attrs)?;

	let mut fields = Vec::new();
	for field in &named.named {
		let Some(ident) = field.ident.clone() else {
			continue;
		};
		let options = field_options(&field.attrs)?;
		let rules = joined_tag(&field.attrs, "validate")?;
		let transforms = joined_tag(&field.attrs, "transform")?;

		if options.skip {
			if !rules.is_empty() || !transforms.is_empty() {
				return Err(syn::Error::new_spanned(
					field,
					"skipped field cannot carry #[validate] or #[transform]",
				));
			}
			continue;
		}
		if options.readonly && !transforms.is_empty() {
			return Err(syn::Error::new_spanned(
				field,
				"readonly field cannot carry #[transform]",
			));
		}

		let plain = ident.unraw().to_string();
		let name = match (options.rename, rename_all) {
			(Some(rename), _) => rename,
			(None, Some(rule)) => rule.apply(&plain),
			(None, None) => plain,
		};

		fields.push(FieldDef {
			ident,
			ty: field.ty.clone(),
			name,
			rules,
			transforms,
			readonly: options.readonly,
		});
	}

	Ok(generate(input, &fields))
}

fn container_options(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
	let mut rename_all = None;
	for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename_all") {
				let lit: LitStr = meta.value()?.parse()?;
				rename_all = Some(RenameRule::parse(&lit)?);
				Ok(())
			} else {
				Err(meta.error("unknown record container attribute"))
			}
		})?;
	}
	Ok(rename_all)
}

fn field_options(attrs: &[Attribute]) -> syn::Result<FieldOptions> {
	let mut options = FieldOptions::default();
	for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
		attr.parse_nested_meta(|meta| {
			if meta.path.is_ident("rename") {
				let lit: LitStr = meta.value()?.parse()?;
				if lit.value().is_empty() {
					return Err(meta.error("rename must not be empty"));
				}
				options.rename = Some(lit.value());
				Ok(())
			} else if meta.path.is_ident("skip") {
				options.skip = true;
				Ok(())
			} else if meta.path.is_ident("readonly") {
				options.readonly = true;
				Ok(())
			} else {
				Err(meta.error("unknown record field attribute"))
			}
		})?;
	}
	Ok(options)
}

/// Collects every `#[name("...")]` on a field into one space-separated tag.
fn joined_tag(attrs: &[Attribute], name: &str) -> syn::Result<String> {
	let mut parts = Vec::new();
	for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
		let lit: LitStr = attr.parse_args()?;
		let value = lit.value();
		let value = value.trim();
		if !value.is_empty() {
			parts.push(value.to_string());
		}
	}
	Ok(parts.join(" "))
}

fn generate(input: &DeriveInput, fields: &[FieldDef]) -> TokenStream2 {
	let ident = &input.ident;
	let record_name = ident.unraw().to_string();
	let mut generics = input.generics.clone();
	if !generics.params.is_empty() {
		let clause = generics.make_where_clause();
		for field in fields {
			let ty = &field.ty;
			clause
				.predicates
				.push(syn::parse_quote!(#ty: ::fieldrules::Inspect));
			if !field.readonly {
				clause
					.predicates
					.push(syn::parse_quote!(#ty: ::fieldrules::InspectMut));
			}
		}
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let count = fields.len();
	let specs = fields.iter().map(|field| {
		let FieldDef {
			name,
			rules,
			transforms,
			..
		} = field;
		quote! { ::fieldrules::FieldSpec::new(#name, #rules, #transforms) }
	});
	let specs_static = if count == 0 {
		TokenStream2::new()
	} else {
		quote! {
			static SPECS: [::fieldrules::FieldSpec; #count] = [#(#specs),*];
		}
	};

	let reads = fields.iter().enumerate().map(|(i, field)| {
		let member = &field.ident;
		quote! {
			::fieldrules::Field::new(&SPECS[#i], ::fieldrules::Inspect::view(&self.#member))
		}
	});
	let writes = fields.iter().enumerate().map(|(i, field)| {
		let member = &field.ident;
		if field.readonly {
			quote! { ::fieldrules::FieldMut::new(&SPECS[#i], ::fieldrules::ValueMut::Immutable) }
		} else {
			quote! {
				::fieldrules::FieldMut::new(&SPECS[#i], ::fieldrules::InspectMut::view_mut(&mut self.#member))
			}
		}
	});

	quote! {
		#[automatically_derived]
		impl #impl_generics ::fieldrules::Record for #ident #ty_generics #where_clause {
			fn fields(&self) -> ::std::vec::Vec<::fieldrules::Field<'_>> {
				#specs_static
				::std::vec![#(#reads),*]
			}

			fn fields_mut(&mut self) -> ::std::vec::Vec<::fieldrules::FieldMut<'_>> {
				#specs_static
				::std::vec![#(#writes),*]
			}

			fn record_name(&self) -> &'static str {
				#record_name
			}
		}

		#[automatically_derived]
		impl #impl_generics ::fieldrules::Inspect for #ident #ty_generics #where_clause {
			fn view(&self) -> ::fieldrules::Value<'_> {
				::fieldrules::Value::Record(self)
			}
		}

		#[automatically_derived]
		impl #impl_generics ::fieldrules::InspectMut for #ident #ty_generics #where_clause {
			fn view_mut(&mut self) -> ::fieldrules::ValueMut<'_> {
				::fieldrules::ValueMut::Record(self)
			}
		}
	}
}
