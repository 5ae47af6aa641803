//! Operation façade.
//!
//! An `Operation` binds an operation name to its input structure and the
//! serializer of its service. It is immutable once built and can be shared
//! across threads without locking.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::arguments::ArgumentNameResolver;
use crate::error::{QueryError, Result};
use crate::standards::query::QuerySerializer;
use crate::types::{ParamValue, Parameters, Shape, ShapeType};

/// Envelope key carrying the operation name.
pub const ACTION_KEY: &str = "Action";
/// Envelope key carrying the service API version.
pub const VERSION_KEY: &str = "Version";

#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    input: Shape,
    api_version: Option<String>,
    serializer: Arc<QuerySerializer>,
    /// caller-facing argument name -> logical member name
    arguments: HashMap<String, String>,
}

static_assertions::assert_impl_all!(Operation: Send, Sync);

impl Operation {
    /// Bind `name` to `input`, which must be a structure shape.
    pub fn new(
        name: impl Into<String>,
        input: Shape,
        serializer: Arc<QuerySerializer>,
        resolver: &dyn ArgumentNameResolver,
    ) -> Result<Self> {
        let name = name.into();
        let Some(members) = input.members() else {
            return Err(QueryError::InvalidModel(format!(
                "input of operation '{name}' must be a structure, found {}",
                input.shape_type().as_str()
            )));
        };

        let mut arguments = HashMap::with_capacity(members.len());
        for member in members.keys() {
            let argument = resolver.argument_name(member);
            if let Some(existing) = arguments.get(&argument) {
                tracing::warn!(
                    operation = %name,
                    argument = %argument,
                    kept = %existing,
                    ignored = %member,
                    "argument name resolves to more than one member"
                );
                continue;
            }
            arguments.insert(argument, member.clone());
        }

        Ok(Self {
            name,
            input,
            api_version: None,
            serializer,
            arguments,
        })
    }

    pub(crate) fn with_api_version(mut self, api_version: Option<String>) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_shape(&self) -> &Shape {
        &self.input
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    pub fn serializer(&self) -> &QuerySerializer {
        &self.serializer
    }

    /// Logical member name for a caller-facing argument name, if any.
    pub fn member_for_argument(&self, argument: &str) -> Option<&str> {
        self.arguments.get(argument).map(String::as_str)
    }

    /// Serialize values keyed by logical member name (`InstanceIds`).
    ///
    /// `values` must be a map or `ParamValue::Null`; members that are not
    /// supplied are skipped.
    pub fn build_parameters(&self, values: impl Into<ParamValue>) -> Result<Parameters> {
        let values = values.into();
        let params = self.serializer.serialize(&self.input, &values)?;
        tracing::debug!(
            operation = %self.name,
            protocol = self.serializer.config().protocol.as_str(),
            parameter_count = params.len(),
            "serialized operation parameters"
        );
        Ok(params)
    }

    /// Serialize values keyed by caller-facing argument name (`instance_ids`).
    ///
    /// Exact member names are accepted as well. Supplying the same member
    /// twice under different spellings is an error.
    pub fn build_parameters_from_args(&self, args: impl Into<ParamValue>) -> Result<Parameters> {
        let translated = self.translate_arguments(args.into())?;
        self.build_parameters(translated)
    }

    /// Like `build_parameters`, plus the `Action` and `Version` envelope keys.
    pub fn request_parameters(&self, values: impl Into<ParamValue>) -> Result<Parameters> {
        let mut params = self.build_parameters(values)?;
        if params.set(ACTION_KEY, self.name.as_str()).is_some() {
            return Err(QueryError::ModelInconsistency {
                key: ACTION_KEY.to_string(),
            });
        }
        if let Some(version) = &self.api_version
            && params.set(VERSION_KEY, version.as_str()).is_some()
        {
            return Err(QueryError::ModelInconsistency {
                key: VERSION_KEY.to_string(),
            });
        }
        Ok(params)
    }

    fn translate_arguments(&self, args: ParamValue) -> Result<ParamValue> {
        let entries = match args {
            ParamValue::Null => return Ok(ParamValue::Null),
            ParamValue::Map(entries) => entries,
            other => {
                return Err(QueryError::type_mismatch(
                    "",
                    ShapeType::Structure.as_str(),
                    other.type_name(),
                ));
            }
        };

        let mut translated = IndexMap::with_capacity(entries.len());
        for (argument, value) in entries {
            let member = match self.arguments.get(&argument) {
                Some(member) => member.clone(),
                None if self.input.member(&argument).is_some() => argument,
                None => return Err(QueryError::unknown_parameter(argument, "")),
            };
            if translated.contains_key(&member) {
                return Err(QueryError::DuplicateArgument(member));
            }
            translated.insert(member, value);
        }
        Ok(ParamValue::Map(translated))
    }
}
