//! Handlebars bindings for the authorization functions.
//!
//! Each function is registered as a helper under its expression name and
//! evaluates to a JSON boolean, so it works inline and as a subexpression:
//!
//! ```handlebars
//! {{#if (hasAnyRoles "admin, editor")}}<a href="/edit">Edit</a>{{/if}}
//! {{#if (isGuest)}}<a href="/login">Log in</a>{{/if}}
//! {{#unless (isPermittedAll roles_needed)}}read-only{{/unless}}
//! ```
//!
//! A string parameter is split on the configured delimiter; an array of
//! strings is passed through as pre-split tokens. A null parameter (usually a
//! variable missing from the data) is reported as a missing argument. Lookup
//! failures become render errors.

use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::Value;
use tracing::debug;

use warden_core::traits::SubjectLookup;

use crate::{
    expressions::{Argument, ExpressionFunctions},
    function::FunctionName,
};

/// Register every authorization function as a helper on `registry`.
pub fn register_helpers<'reg, L>(registry: &mut Handlebars<'reg>, functions: Arc<ExpressionFunctions<L>>)
where
    L: SubjectLookup + 'reg,
{
    for function in FunctionName::ALL {
        registry.register_helper(
            function.as_str(),
            Box::new(AuthorizationHelper {
                function,
                functions: Arc::clone(&functions),
            }),
        );
    }

    debug!(
        count = FunctionName::ALL.len(),
        delimiter = %functions.splitter().delimiter,
        "registered authorization helpers"
    );
}

struct AuthorizationHelper<L> {
    function: FunctionName,
    functions: Arc<ExpressionFunctions<L>>,
}

impl<L: SubjectLookup> HelperDef for AuthorizationHelper<L> {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let name = self.function.as_str();

        let result = match h.param(0).map(|param| param.value()) {
            None if self.function.takes_argument() => {
                return Err(RenderErrorReason::ParamNotFoundForIndex(name, 0).into());
            }
            None => self.functions.call_with(self.function, Argument::Absent),
            // A variable missing from the template data also resolves to null.
            Some(Value::Null) if self.function.takes_argument() => {
                return Err(RenderErrorReason::Other(format!(
                    "{}: argument is missing or null in the template data",
                    name
                ))
                .into());
            }
            Some(Value::String(value)) => self
                .functions
                .call_with(self.function, Argument::Delimited(value)),
            Some(Value::Array(items)) => {
                let tokens = items
                    .iter()
                    .map(Value::as_str)
                    .collect::<Option<Vec<&str>>>()
                    .ok_or(RenderErrorReason::InvalidParamType("array of strings"))?;
                self.functions.call_with(self.function, Argument::Tokens(&tokens))
            }
            Some(_) if !self.function.takes_argument() => {
                self.functions.call_with(self.function, Argument::Absent)
            }
            Some(_) => return Err(RenderErrorReason::InvalidParamType("string").into()),
        };

        result
            .map(|allowed| ScopedJson::Derived(Value::Bool(allowed)))
            .map_err(|e| RenderErrorReason::Other(format!("{}: {}", name, e)).into())
    }
}
