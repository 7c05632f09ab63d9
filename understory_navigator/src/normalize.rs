// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Params normalization and verb lowering.
//!
//! Every verb entry point takes variadic [`ParamArg`]s. They are filtered and
//! merged left to right (later keys override), then tagged with `routeName`.
//! Directly dispatchable verbs are then lowered into a single [`RouteAction`].

use serde_json::Value;
use understory_route_tree::{Params, RouteAction};

use crate::types::{DATA_KEY, ParamArg, ROUTE_NAME_KEY, TYPE_KEY, Verb};

/// Scripting-style truthiness: `null`, `false`, `0`, and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Reduce one argument to a params object.
///
/// Objects pass through, other values are wrapped as `{ "data": value }`,
/// and foreign payloads yield an empty object.
pub fn filter_param(arg: &ParamArg) -> Params {
    match arg {
        ParamArg::Foreign => Params::new(),
        ParamArg::Value(Value::Object(map)) => map.clone(),
        ParamArg::Value(other) => {
            let mut wrapped = Params::new();
            wrapped.insert(DATA_KEY.into(), other.clone());
            wrapped
        }
    }
}

/// Merge `args` left to right and attach `routeName`.
///
/// Falsy values are skipped entirely.
pub fn unite_params(route_name: &str, args: &[ParamArg]) -> Params {
    let mut out = Params::new();
    for arg in args {
        if let ParamArg::Value(v) = arg
            && !is_truthy(v)
        {
            continue;
        }
        out.extend(filter_param(arg));
    }
    out.insert(ROUTE_NAME_KEY.into(), Value::String(route_name.into()));
    out
}

/// Verb embedded in normalized params under `"type"`, if any.
pub fn embedded_verb(params: &Params) -> Option<Verb> {
    params
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(Verb::from)
}

/// Returns true when `params` carries anything besides `routeName`.
pub fn has_caller_params(params: &Params) -> bool {
    params.keys().any(|k| k != ROUTE_NAME_KEY)
}

/// Lower a directly dispatchable verb.
///
/// Returns `None` for verbs that need a custom algorithm or only reach a reducer.
pub fn lower(verb: &Verb, route_name: &str, params: &Params) -> Option<RouteAction> {
    let navigate = || RouteAction::navigate(route_name, Some(params.clone()));
    match verb {
        Verb::Push | Verb::Jump => Some(navigate()),
        Verb::Pop | Verb::Refresh => Some(RouteAction::back()),
        Verb::Reset => Some(RouteAction::reset(None, 0, vec![navigate()])),
        Verb::Replace => Some(RouteAction::reset(
            Some(route_name.into()),
            0,
            vec![navigate()],
        )),
        Verb::BackAction
        | Verb::PopAndReplace
        | Verb::PopTo
        | Verb::PushOrPop
        | Verb::PopAndPush
        | Verb::DrawerOpen
        | Verb::DrawerClose
        | Verb::Init
        | Verb::Custom(_) => None,
    }
}
