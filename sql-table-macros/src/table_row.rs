use proc_macro2::TokenStream as TokenStream2;
use syn::{DeriveInput, Field, Fields};

use crate::utils;

/// Generate implementation of `TableRow` trait.
pub fn table_row(
    DeriveInput {
        ident,
        data,
        mut generics,
        ..
    }: DeriveInput,
) -> syn::Result<TokenStream2> {
    let syn::Data::Struct(struct_data) = data else {
        return Err(syn::Error::new(
            ident.span(),
            format!("Cannot derive TableRow for {ident}; it can only be derived for structs"),
        ));
    };
    let Fields::Named(named) = struct_data.fields else {
        return Err(syn::Error::new(
            ident.span(),
            format!("Cannot derive TableRow for {ident}; it requires named fields"),
        ));
    };

    let mut mapped = Vec::with_capacity(named.named.len());
    for field in named.named {
        if !is_skipped(&field)? {
            mapped.push(field);
        }
    }

    let populate = impl_populate(&mapped);
    let fields = impl_fields(&mapped);
    if generics.type_params().next().is_some() {
        add_field_bounds(&mut generics, &mapped);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote::quote! {
        impl #impl_generics ::sql_table::prelude::TableRow for #ident #ty_generics #where_clause {
            #populate

            #fields
        }
    })
}

/// Requires every mapped field type of a generic struct to be readable and bindable.
fn add_field_bounds(generics: &mut syn::Generics, fields: &[Field]) {
    let where_clause = generics.make_where_clause();
    for field in fields {
        let field_ty = &field.ty;
        where_clause.predicates.push(syn::parse_quote! {
            #field_ty: ::sql_table::prelude::FromValue
                + ::std::clone::Clone
                + ::std::convert::Into<::sql_table::prelude::Value>
        });
    }
}

/// Returns whether the field carries `#[table_row(skip)]`.
fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("table_row")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported table_row attribute; expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

/// Generate implementation of `populate` method.
fn impl_populate(fields: &[Field]) -> TokenStream2 {
    let count = fields.len();
    let locals = utils::column_idents(count);

    // read every column first, so that a failing read leaves the row unchanged
    let reads = fields.iter().zip(&locals).enumerate().map(|(index, (field, local))| {
        let field_ty = &field.ty;
        quote::quote! {
            let #local = row.get::<#field_ty>(#index)?;
        }
    });
    let assignments = fields.iter().zip(&locals).map(|(field, local)| {
        let field_name = &field.ident;
        quote::quote! {
            self.#field_name = #local;
        }
    });

    quote::quote! {
        fn populate(
            &mut self,
            row: &dyn ::sql_table::prelude::RowScanner,
        ) -> ::sql_table::prelude::ScanResult<()> {
            row.expect_columns(#count)?;
            #(#reads)*
            #(#assignments)*
            ::std::result::Result::Ok(())
        }
    }
}

/// Generate implementation of `fields` method.
fn impl_fields(fields: &[Field]) -> TokenStream2 {
    let values = fields.iter().map(|field| {
        let field_name = &field.ident;
        quote::quote! {
            ::sql_table::prelude::Value::from(::std::clone::Clone::clone(&self.#field_name))
        }
    });

    quote::quote! {
        fn fields(&self) -> ::std::vec::Vec<::sql_table::prelude::Value> {
            ::std::vec![#(#values),*]
        }
    }
}
