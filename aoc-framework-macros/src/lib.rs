//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::{Parse, Parser};
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Store the value of a `key = value` property, rejecting a second occurrence.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{key}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

/// The `key = value` arguments of `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    name: Option<Expr>,
    parsed: Option<Type>,
    part_one: Option<Type>,
    part_two: Option<Type>,
}

impl RunnerProperties {
    fn parse(args: proc_macro2::TokenStream) -> syn::Result<Self> {
        let mut properties = Self::default();
        let property_parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("name") {
                set_once(&mut properties.name, &meta, "name")
            } else if meta.path.is_ident("parsed") {
                set_once(&mut properties.parsed, &meta, "parsed")
            } else if meta.path.is_ident("part_one") {
                set_once(&mut properties.part_one, &meta, "part_one")
            } else if meta.path.is_ident("part_two") {
                set_once(&mut properties.part_two, &meta, "part_two")
            } else {
                Err(meta.error("unsupported solution runner property"))
            }
        });
        property_parser.parse2(args)?;
        Ok(properties)
    }

    /// The body of `SolutionRunner::run`: binds `name`, then calls the matching `solve_*`.
    fn run_body(self) -> syn::Result<proc_macro2::TokenStream> {
        let (Some(name), Some(part_one)) = (self.name, self.part_one) else {
            return Err(Error::new(
                Span::call_site(),
                "missing required property: 'name' and 'part_one' must both be given",
            ));
        };

        let solve_call = match (self.parsed, self.part_two) {
            (None, None) => quote! {
                aoc_framework::runner::solve_half_solution::<#part_one>(name, input, handler, timed)
            },
            (None, Some(part_two)) => quote! {
                aoc_framework::runner::solve_full_solution::<#part_one, #part_two>(
                    name, input, handler, timed
                )
            },
            (Some(parsed), None) => quote! {
                aoc_framework::runner::solve_parsed_half_solution::<#parsed, #part_one>(
                    name, input, handler, timed
                )
            },
            (Some(parsed), Some(part_two)) => quote! {
                aoc_framework::runner::solve_parsed_full_solution::<#parsed, #part_one, #part_two>(
                    name, input, handler, timed
                )
            },
        };

        Ok(quote! {
            let name: &str = #name;
            #solve_call
        })
    }
}

/// Implements `aoc_framework::runner::SolutionRunner` for the annotated struct or impl block's
/// type.
///
/// # Properties
///
/// - `name` (required): a `&str` expression, the name printed when the day runs.
/// - `part_one` (required): the type implementing `Solution<PartOne>`.
/// - `part_two` (optional): the type implementing `Solution<PartTwo>`.
/// - `parsed` (optional): a `ParseData` type; when given, the input is parsed once and both
///   parts receive the parsed value instead of the raw string.
///
/// # Errors
///
/// Compile errors for a missing required property, a repeated property, an unknown property, or
/// an item that is neither a struct nor an impl block.
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(name = "Day 1: Trebuchet?!", part_one = Day01, part_two = Day01)]
/// impl super::AdventOfCode2023<1> {}
///
/// #[solution_runner(name = "Day 2: Cube Conundrum", parsed = Games, part_one = Day02)]
/// struct Day02Runner;
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let run_body = match RunnerProperties::parse(args.into()).and_then(RunnerProperties::run_body)
    {
        Ok(run_body) => run_body,
        Err(error) => return error.to_compile_error().into(),
    };

    let original = proc_macro2::TokenStream::from(input.clone());
    let runner_ty: Type = match parse_macro_input!(input as Item) {
        Item::Struct(ItemStruct { ident, .. }) => syn::parse_quote!(#ident),
        Item::Impl(ItemImpl { self_ty, .. }) => *self_ty,
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    TokenStream::from(quote! {
        #original

        impl aoc_framework::runner::SolutionRunner for #runner_ty {
            fn run(
                input: &str,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
                timed: bool,
            ) -> aoc_framework::DynamicResult<()> {
                #run_body
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_body_for(args: proc_macro2::TokenStream) -> syn::Result<String> {
        RunnerProperties::parse(args)
            .and_then(RunnerProperties::run_body)
            .map(|body| body.to_string())
    }

    #[test]
    fn picks_solve_function_from_properties() -> syn::Result<()> {
        let half = run_body_for(quote!(name = "Day 1", part_one = Day01))?;
        assert!(half.contains("solve_half_solution"));

        let parsed_full = run_body_for(quote!(
            name = "Day 2",
            parsed = Games,
            part_one = Day02,
            part_two = Day02
        ))?;
        assert!(parsed_full.contains("solve_parsed_full_solution"));
        Ok(())
    }

    #[test]
    fn rejects_missing_part_one() {
        let Err(error) = run_body_for(quote!(name = "Day 1", part_two = Day01)) else {
            panic!("part_one is required");
        };
        assert!(error.to_string().starts_with("missing required property"));
    }

    #[test]
    fn rejects_duplicate_property() {
        let Err(error) = run_body_for(quote!(name = "a", name = "b", part_one = Day01)) else {
            panic!("name is given twice");
        };
        assert_eq!(error.to_string(), "duplicate 'name' property");
    }

    #[test]
    fn rejects_unknown_property() {
        let Err(error) = run_body_for(quote!(name = "a", part_three = Day01)) else {
            panic!("part_three is not a property");
        };
        assert_eq!(error.to_string(), "unsupported solution runner property");
    }
}
