//! Service Model
//!
//! Static registry of resource types. Each [`ResourceType`] is assembled once
//! at startup from typed accessors and afterwards only read, so a single
//! [`ServiceModel`] can be shared between threads behind an `Arc`.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bindings::{AttributeBinding, BindingFault, HookBinding, IdentityBinding};
use crate::{Attributes, Links, Meta, ModelError, ModelResult, Relationships};

/// Type-erased domain object
pub type DomainObject = Box<dyn Any>;

/// Metadata for one API resource type
pub struct ResourceType {
    api_type: String,
    domain_type: &'static str,
    type_id: TypeId,
    create: Box<dyn Fn() -> DomainObject + Send + Sync>,
    identity: IdentityBinding,
    attributes: Vec<AttributeBinding>,
    meta: Option<HookBinding<Meta>>,
    relationships: Option<HookBinding<Relationships>>,
    links: Option<HookBinding<Links>>,
}

impl ResourceType {
    /// Start describing how `T` maps onto the API type `api_type`
    pub fn builder<T: Default + 'static>(api_type: &str) -> ResourceTypeBuilder<T> {
        ResourceTypeBuilder {
            api_type: api_type.to_string(),
            identity: None,
            unset_id: None,
            attributes: Vec::new(),
            meta: None,
            relationships: None,
            links: None,
            _domain: PhantomData,
        }
    }

    /// API type name (`type` member on the wire)
    pub fn api_type(&self) -> &str {
        &self.api_type
    }

    /// Rust type name of the domain type
    pub fn domain_type(&self) -> &'static str {
        self.domain_type
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is_domain<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn identity(&self) -> &IdentityBinding {
        &self.identity
    }

    /// Attribute bindings in registration order
    pub fn attributes(&self) -> &[AttributeBinding] {
        &self.attributes
    }

    /// Binding for an API attribute name
    pub fn attribute(&self, api_name: &str) -> Option<&AttributeBinding> {
        self.attributes.iter().find(|a| a.api_name() == api_name)
    }

    /// New domain object with default property values
    pub fn create_blank(&self) -> DomainObject {
        (self.create)()
    }

    fn mismatch(&self) -> ModelError {
        ModelError::DomainTypeMismatch {
            api_type: self.api_type.clone(),
            expected: self.domain_type,
        }
    }

    fn invalid_id(&self, id: &str, reason: String) -> ModelError {
        ModelError::InvalidId {
            api_type: self.api_type.clone(),
            id: id.to_string(),
            reason,
        }
    }

    fn attribute_fault(&self, attribute: &str, fault: BindingFault) -> ModelError {
        match fault {
            BindingFault::WrongDomainType => self.mismatch(),
            BindingFault::Conversion(reason) => ModelError::AttributeConversion {
                api_type: self.api_type.clone(),
                attribute: attribute.to_string(),
                reason,
            },
        }
    }

    fn hook_fault(&self, fault: BindingFault) -> ModelError {
        match fault {
            BindingFault::WrongDomainType => self.mismatch(),
            BindingFault::Conversion(reason) => self.invalid_id("", reason),
        }
    }

    /// Wire id string to domain id value
    pub fn wire_id_to_domain_id(&self, wire: &str) -> ModelResult<Value> {
        self.identity
            .wire_id_to_domain_id(wire)
            .map_err(|reason| self.invalid_id(wire, reason))
    }

    /// Whether a domain id stands for "no id yet": the value declared with
    /// [`ResourceTypeBuilder::unset_id`], or one whose wire form is empty
    pub fn is_unset_id(&self, domain_id: &Value) -> bool {
        self.identity.unset.as_ref() == Some(domain_id)
            || self
                .identity
                .domain_id_to_wire_id(domain_id)
                .is_ok_and(|wire| wire.is_empty())
    }

    /// Domain id value to wire id string
    pub fn domain_id_to_wire_id(&self, value: &Value) -> ModelResult<String> {
        self.identity
            .domain_id_to_wire_id(value)
            .map_err(|reason| self.invalid_id(&value.to_string(), reason))
    }

    // ------------------------------------------------------------------
    // wire -> domain
    // ------------------------------------------------------------------

    pub fn apply_id(&self, obj: &mut dyn Any, domain_id: &Value) -> ModelResult<()> {
        (self.identity.set)(obj, domain_id.clone()).map_err(|fault| match fault {
            BindingFault::WrongDomainType => self.mismatch(),
            BindingFault::Conversion(reason) => self.invalid_id(&domain_id.to_string(), reason),
        })
    }

    pub fn apply_attribute(&self, obj: &mut dyn Any, api_name: &str, value: Value) -> ModelResult<()> {
        let binding = self
            .attribute(api_name)
            .ok_or_else(|| ModelError::UnknownAttribute {
                api_type: self.api_type.clone(),
                attribute: api_name.to_string(),
            })?;
        (binding.set)(obj, value).map_err(|fault| self.attribute_fault(api_name, fault))
    }

    /// Apply every attribute of a wire attribute map
    pub fn apply_attributes(&self, obj: &mut dyn Any, attributes: &Attributes) -> ModelResult<()> {
        for (name, value) in attributes {
            self.apply_attribute(obj, name, value.clone())?;
        }
        Ok(())
    }

    /// Push meta onto the domain object. No-op when the type has no meta property.
    pub fn apply_meta(&self, obj: &mut dyn Any, meta: Meta) -> ModelResult<()> {
        match &self.meta {
            Some(hook) => (hook.set)(obj, meta).map_err(|fault| self.hook_fault(fault)),
            None => Ok(()),
        }
    }

    /// Push relationships onto the domain object. No-op without a relationships property.
    pub fn apply_relationships(&self, obj: &mut dyn Any, relationships: Relationships) -> ModelResult<()> {
        match &self.relationships {
            Some(hook) => (hook.set)(obj, relationships).map_err(|fault| self.hook_fault(fault)),
            None => Ok(()),
        }
    }

    /// Push links onto the domain object. No-op without a links property.
    pub fn apply_links(&self, obj: &mut dyn Any, links: Links) -> ModelResult<()> {
        match &self.links {
            Some(hook) => (hook.set)(obj, links).map_err(|fault| self.hook_fault(fault)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // domain -> wire
    // ------------------------------------------------------------------

    /// Domain id value of an object
    pub fn id_of(&self, obj: &dyn Any) -> ModelResult<Value> {
        (self.identity.get)(obj).map_err(|fault| self.hook_fault(fault))
    }

    /// Values of every bound attribute, in registration order
    pub fn attributes_of<'a>(&'a self, obj: &dyn Any) -> ModelResult<Vec<(&'a AttributeBinding, Value)>> {
        self.attributes
            .iter()
            .map(|binding| {
                (binding.get)(obj)
                    .map(|value| (binding, value))
                    .map_err(|fault| self.attribute_fault(binding.api_name(), fault))
            })
            .collect()
    }

    pub fn meta_of(&self, obj: &dyn Any) -> ModelResult<Option<Meta>> {
        match &self.meta {
            Some(hook) => (hook.get)(obj).map_err(|fault| self.hook_fault(fault)),
            None => Ok(None),
        }
    }

    pub fn relationships_of(&self, obj: &dyn Any) -> ModelResult<Option<Relationships>> {
        match &self.relationships {
            Some(hook) => (hook.get)(obj).map_err(|fault| self.hook_fault(fault)),
            None => Ok(None),
        }
    }

    pub fn links_of(&self, obj: &dyn Any) -> ModelResult<Option<Links>> {
        match &self.links {
            Some(hook) => (hook.get)(obj).map_err(|fault| self.hook_fault(fault)),
            None => Ok(None),
        }
    }
}

impl fmt::Debug for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceType")
            .field("api_type", &self.api_type)
            .field("domain_type", &self.domain_type)
            .field("identity", &self.identity)
            .field("attributes", &self.attributes)
            .field("meta", &self.meta.is_some())
            .field("relationships", &self.relationships.is_some())
            .field("links", &self.links.is_some())
            .finish()
    }
}

/// Builder for [`ResourceType`]
pub struct ResourceTypeBuilder<T> {
    api_type: String,
    identity: Option<IdentityBinding>,
    unset_id: Option<Result<Value, String>>,
    attributes: Vec<AttributeBinding>,
    meta: Option<HookBinding<Meta>>,
    relationships: Option<HookBinding<Relationships>>,
    links: Option<HookBinding<Links>>,
    _domain: PhantomData<fn() -> T>,
}

impl<T: Default + 'static> ResourceTypeBuilder<T> {
    /// Bind the id property. The id type converts from the wire string with
    /// `FromStr` and back with `Display`.
    pub fn id<I, G, S>(mut self, property: &str, get: G, set: S) -> Self
    where
        I: FromStr + fmt::Display + Serialize + DeserializeOwned + 'static,
        I::Err: fmt::Display,
        G: Fn(&T) -> I + Send + Sync + 'static,
        S: Fn(&mut T, I) + Send + Sync + 'static,
    {
        self.identity = Some(IdentityBinding::new::<T, I, G, S>(property, get, set));
        self
    }

    /// Domain id value that marks an object not yet persisted, such as `0`
    /// for a numeric id. Objects carrying it get no wire id. An id that
    /// renders as an empty string is always treated this way.
    pub fn unset_id<I: Serialize>(mut self, value: I) -> Self {
        self.unset_id = Some(serde_json::to_value(value).map_err(|e| e.to_string()));
        self
    }

    /// Bind a scalar attribute
    pub fn attribute<P, G, S>(mut self, api_name: &str, property: &str, get: G, set: S) -> Self
    where
        P: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> P + Send + Sync + 'static,
        S: Fn(&mut T, P) + Send + Sync + 'static,
    {
        self.attributes
            .push(AttributeBinding::new::<T, P, G, S>(api_name, property, false, get, set));
        self
    }

    /// Bind a nested object attribute
    pub fn complex_attribute<P, G, S>(mut self, api_name: &str, property: &str, get: G, set: S) -> Self
    where
        P: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> P + Send + Sync + 'static,
        S: Fn(&mut T, P) + Send + Sync + 'static,
    {
        self.attributes
            .push(AttributeBinding::new::<T, P, G, S>(api_name, property, true, get, set));
        self
    }

    pub fn meta<G, S>(mut self, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Option<Meta> + Send + Sync + 'static,
        S: Fn(&mut T, Meta) + Send + Sync + 'static,
    {
        self.meta = Some(HookBinding::new::<T, G, S>(get, set));
        self
    }

    pub fn relationships<G, S>(mut self, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Option<Relationships> + Send + Sync + 'static,
        S: Fn(&mut T, Relationships) + Send + Sync + 'static,
    {
        self.relationships = Some(HookBinding::new::<T, G, S>(get, set));
        self
    }

    pub fn links<G, S>(mut self, get: G, set: S) -> Self
    where
        G: Fn(&T) -> Option<Links> + Send + Sync + 'static,
        S: Fn(&mut T, Links) + Send + Sync + 'static,
    {
        self.links = Some(HookBinding::new::<T, G, S>(get, set));
        self
    }

    pub fn build(self) -> ModelResult<ResourceType> {
        let mut identity = self
            .identity
            .ok_or_else(|| ModelError::MissingIdentity(self.api_type.clone()))?;
        match self.unset_id {
            Some(Ok(value)) => identity.unset = Some(value),
            Some(Err(reason)) => {
                return Err(ModelError::InvalidId {
                    api_type: self.api_type,
                    id: "<unset>".to_string(),
                    reason,
                });
            }
            None => {}
        }
        for (i, binding) in self.attributes.iter().enumerate() {
            if self.attributes[..i]
                .iter()
                .any(|b| b.api_name() == binding.api_name())
            {
                return Err(ModelError::DuplicateAttribute {
                    api_type: self.api_type,
                    attribute: binding.api_name().to_string(),
                });
            }
        }
        Ok(ResourceType {
            api_type: self.api_type,
            domain_type: type_name::<T>(),
            type_id: TypeId::of::<T>(),
            create: Box::new(|| Box::new(T::default()) as DomainObject),
            identity,
            attributes: self.attributes,
            meta: self.meta,
            relationships: self.relationships,
            links: self.links,
        })
    }
}

/// Registry of resource types, looked up by API name or domain type
#[derive(Debug, Default)]
pub struct ServiceModel {
    resource_types: Vec<ResourceType>,
    by_api_type: HashMap<String, usize>,
    by_type_id: HashMap<TypeId, usize>,
}

impl ServiceModel {
    pub fn builder() -> ServiceModelBuilder {
        ServiceModelBuilder::default()
    }

    /// Model with no registered types
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resource type registered for an API type name
    pub fn resolve(&self, api_type: &str) -> ModelResult<&ResourceType> {
        self.try_resolve(api_type)
            .ok_or_else(|| ModelError::UnknownResourceType(api_type.to_string()))
    }

    pub fn try_resolve(&self, api_type: &str) -> Option<&ResourceType> {
        self.by_api_type
            .get(api_type)
            .map(|&index| &self.resource_types[index])
    }

    /// Resource type registered for the domain type `T`
    pub fn resolve_domain<T: 'static>(&self) -> ModelResult<&ResourceType> {
        self.resolve_type_id(TypeId::of::<T>())
            .ok_or(ModelError::UnknownDomainType(type_name::<T>()))
    }

    pub fn resolve_type_id(&self, type_id: TypeId) -> Option<&ResourceType> {
        self.by_type_id
            .get(&type_id)
            .map(|&index| &self.resource_types[index])
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &ResourceType> {
        self.resource_types.iter()
    }

    pub fn len(&self) -> usize {
        self.resource_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resource_types.is_empty()
    }
}

/// Builder for [`ServiceModel`]
#[derive(Debug, Default)]
pub struct ServiceModelBuilder {
    resource_types: Vec<ResourceType>,
}

impl ServiceModelBuilder {
    pub fn resource_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_types.push(resource_type);
        self
    }

    pub fn build(self) -> ModelResult<ServiceModel> {
        let mut model = ServiceModel::default();
        for resource_type in self.resource_types {
            let index = model.resource_types.len();
            if model.by_api_type.contains_key(resource_type.api_type())
                || model.by_type_id.contains_key(&resource_type.type_id())
            {
                return Err(ModelError::DuplicateResourceType(
                    resource_type.api_type().to_string(),
                ));
            }
            model
                .by_api_type
                .insert(resource_type.api_type().to_string(), index);
            model.by_type_id.insert(resource_type.type_id(), index);
            tracing::debug!(
                "registered resource type '{}' -> {}",
                resource_type.api_type(),
                resource_type.domain_type()
            );
            model.resource_types.push(resource_type);
        }
        Ok(model)
    }
}
