use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::spanned::Spanned;
use syn::{parse_macro_input, Attribute, ImplItem, ItemImpl, LitInt, LitStr, Meta, Type};

const HTTP_METHODS: [&str; 2] = ["get", "post"];

/// Generates an Axum router and an OpenAPI struct from a controller impl.
///
/// Usage:
/// ```rust,ignore
/// struct UserController;
///
/// #[controller(state = AppState)]
/// impl UserController {
///     #[get("/users")]
///     #[utoipa_response(status = 200, body = Vec<User>, description = "All users")]
///     async fn list(State(state): State<AppState>) -> Json<Vec<User>> { ... }
///
///     #[post("/users")]
///     #[utoipa_request_body(NewUser)]
///     #[utoipa_response(status = 201, body = User, description = "User created")]
///     async fn create(State(state): State<AppState>, Json(user): Json<NewUser>) -> Json<User> { ... }
/// }
/// ```
///
/// Expands to the impl block (with the route and `utoipa_*` attributes removed), an
/// `impl Controller for UserController` whose `router()` returns
/// `axum::Router<AppState>`, one `#[utoipa::path]` stub per route and a
/// `UserControllerApi` struct deriving `utoipa::OpenApi`.
#[proc_macro_attribute]
pub fn controller(args: TokenStream, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(args as ControllerArgs);
    let mut impl_block = parse_macro_input!(input as ItemImpl);

    let self_ty = impl_block.self_ty.clone();
    let struct_name = match &*self_ty {
        Type::Path(type_path) => match type_path.path.segments.last() {
            Some(segment) => segment.ident.clone(),
            None => {
                return syn::Error::new(type_path.span(), "Expected a struct type")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new(impl_block.span(), "Expected a struct type")
                .to_compile_error()
                .into();
        }
    };
    let Some(state_ty) = args.state else {
        return syn::Error::new(proc_macro2::Span::call_site(), "Expected #[controller(state = Type)]")
            .to_compile_error()
            .into();
    };
    let tag = struct_name.to_string();

    let mut route_registrations = Vec::new();
    let mut path_stubs = Vec::new();
    let mut path_names = Vec::new();
    let mut schema_types: Vec<Type> = Vec::new();

    for item in &mut impl_block.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let route = match extract_route_attr(&method.attrs) {
            Ok(Some(route)) => route,
            Ok(None) => continue,
            Err(err) => return err.to_compile_error().into(),
        };

        let responses = match extract_responses(&method.attrs) {
            Ok(responses) => responses,
            Err(err) => return err.to_compile_error().into(),
        };
        let request_body = match extract_request_body(&method.attrs) {
            Ok(body) => body,
            Err(err) => return err.to_compile_error().into(),
        };

        method.attrs.retain(|attr| !is_helper_attr(attr));

        let fn_name = &method.sig.ident;
        let axum_method = format_ident!("{}", route.method);
        let path = &route.path;

        route_registrations.push(quote! {
            router = router.route(#path, axum::routing::#axum_method(#self_ty::#fn_name));
        });

        let mut path_attr = quote! {
            #axum_method,
            path = #path,
            tag = #tag,
        };

        if let Some(body) = &request_body {
            path_attr.extend(quote! { request_body = #body, });
            collect_schema_types(body, &mut schema_types);
        }

        if !responses.is_empty() {
            let tokens = responses.iter().map(ResponseArgs::to_tokens);
            path_attr.extend(quote! { responses( #(#tokens),* ), });

            for response in &responses {
                collect_schema_types(&response.body, &mut schema_types);
            }
        }

        let stub_name = format_ident!("__utoipa_path_{}", fn_name);
        // utoipa reads summary and description from the doc comments
        let docs = method.attrs.iter().filter(|attr| attr.path().is_ident("doc"));

        path_stubs.push(quote! {
            #(#docs)*
            #[allow(dead_code)]
            #[utoipa::path( #path_attr )]
            fn #stub_name() {}
        });
        path_names.push(stub_name);
    }

    let mut seen = std::collections::HashSet::new();
    schema_types.retain(|ty| seen.insert(quote!(#ty).to_string()));

    let api_struct_name = format_ident!("{}Api", struct_name);
    let components = if schema_types.is_empty() {
        quote! {}
    } else {
        quote! { , components(schemas( #(#schema_types),* )) }
    };

    let expanded = quote! {
        #impl_block

        impl clientes_core::controller::Controller for #self_ty {
            type State = #state_ty;

            fn router() -> axum::Router<Self::State> {
                let mut router = axum::Router::new();

                #(#route_registrations)*

                router
            }
        }

        #(#path_stubs)*

        #[derive(utoipa::OpenApi)]
        #[openapi(paths( #(#path_names),* ) #components)]
        pub struct #api_struct_name;
    };

    TokenStream::from(expanded)
}

/// Arguments of `#[controller(...)]`.
struct ControllerArgs {
    state: Option<Type>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut state = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            let _eq: syn::Token![=] = input.parse()?;

            if key == "state" {
                state = Some(input.parse()?);
            } else {
                return Err(syn::Error::new(key.span(), format!("Unknown argument: {}", key)));
            }

            if !input.is_empty() {
                let _comma: syn::Token![,] = input.parse()?;
            }
        }

        Ok(ControllerArgs { state })
    }
}

struct Route {
    method: String,
    path: LitStr,
}

fn last_segment(attr: &Attribute) -> Option<String> {
    attr.path().segments.last().map(|segment| segment.ident.to_string())
}

fn is_helper_attr(attr: &Attribute) -> bool {
    match last_segment(attr) {
        Some(name) => {
            HTTP_METHODS.contains(&name.as_str())
                || name == "utoipa_response"
                || name == "utoipa_request_body"
        }
        None => false,
    }
}

/// Finds `#[get("/path")]`, `#[clientes_macros::post("/path")]` and friends.
fn extract_route_attr(attrs: &[Attribute]) -> syn::Result<Option<Route>> {
    for attr in attrs {
        let Some(method) = last_segment(attr) else {
            continue;
        };
        if !HTTP_METHODS.contains(&method.as_str()) {
            continue;
        }

        let Meta::List(meta) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "Expected a path, e.g. #[get(\"/users\")]"));
        };
        let path = syn::parse2::<LitStr>(meta.tokens.clone())?;

        return Ok(Some(Route { method, path }));
    }

    Ok(None)
}

fn extract_request_body(attrs: &[Attribute]) -> syn::Result<Option<Type>> {
    for attr in attrs {
        if last_segment(attr).as_deref() != Some("utoipa_request_body") {
            continue;
        }

        return attr.parse_args::<Type>().map(Some);
    }

    Ok(None)
}

/// Collects every `#[utoipa_response(...)]` on a handler.
///
/// Accepted forms:
/// - `#[utoipa_response(body = Type)]`: status 200
/// - `#[utoipa_response(status = 201, body = Type)]`
/// - `#[utoipa_response(status = 500, body = Type, description = "...")]`
fn extract_responses(attrs: &[Attribute]) -> syn::Result<Vec<ResponseArgs>> {
    let mut responses = Vec::new();

    for attr in attrs {
        if last_segment(attr).as_deref() != Some("utoipa_response") {
            continue;
        }

        let Meta::List(meta) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "Expected #[utoipa_response(...)]"));
        };

        responses.push(syn::parse2::<ResponseArgs>(meta.tokens.clone())?);
    }

    Ok(responses)
}

/// Pushes `ty` into `schemas`, unwrapping generic containers such as
/// `Vec<User>` so only named schema types end up in `components`.
fn collect_schema_types(ty: &Type, schemas: &mut Vec<Type>) {
    let Type::Path(type_path) = ty else {
        return;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return;
    };

    match &segment.arguments {
        syn::PathArguments::AngleBracketed(args) => {
            for arg in &args.args {
                if let syn::GenericArgument::Type(inner) = arg {
                    collect_schema_types(inner, schemas);
                }
            }
        }
        _ => schemas.push(ty.clone()),
    }
}

struct ResponseArgs {
    status: u16,
    body: Type,
    description: Option<String>,
}

impl ResponseArgs {
    fn to_tokens(&self) -> proc_macro2::TokenStream {
        let status = self.status;
        let body = &self.body;
        let description = self.description.as_deref().unwrap_or("Success");

        quote! {
            (status = #status, description = #description, body = #body)
        }
    }
}

impl Parse for ResponseArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut status = None;
        let mut body = None;
        let mut description = None;

        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            let _eq: syn::Token![=] = input.parse()?;

            if key == "status" {
                let lit: LitInt = input.parse()?;
                status = Some(lit.base10_parse::<u16>()?);
            } else if key == "body" {
                body = Some(input.parse()?);
            } else if key == "description" {
                let lit: LitStr = input.parse()?;
                description = Some(lit.value());
            } else {
                return Err(syn::Error::new(key.span(), format!("Unknown argument: {}", key)));
            }

            if !input.is_empty() {
                let _comma: syn::Token![,] = input.parse()?;
            }
        }

        let Some(body) = body else {
            return Err(input.error("Missing `body = Type`"));
        };

        Ok(ResponseArgs {
            status: status.unwrap_or(200),
            body,
            description,
        })
    }
}

/// Marks a controller method as a GET route.
#[proc_macro_attribute]
pub fn get(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Marks a controller method as a POST route.
#[proc_macro_attribute]
pub fn post(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Documents one response of a controller method. Read and removed by
/// `#[controller]`; on its own it does nothing.
#[proc_macro_attribute]
pub fn utoipa_response(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}

/// Documents the request body of a controller method. Read and removed by
/// `#[controller]`; on its own it does nothing.
#[proc_macro_attribute]
pub fn utoipa_request_body(_args: TokenStream, input: TokenStream) -> TokenStream {
    input
}
