//! Property bindings
//!
//! Typed getter/setter pairs supplied at registration time, erased to
//! `dyn Any` so a [`ResourceType`](crate::ResourceType) can move values
//! between wire form and a domain object without knowing its Rust type.
//! Values cross the boundary as `serde_json::Value`.

use std::any::{Any, type_name};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Why an erased accessor failed; turned into a `ModelError` by the caller,
/// which knows the resource type and member involved.
#[derive(Debug)]
pub(crate) enum BindingFault {
    WrongDomainType,
    Conversion(String),
}

pub(crate) type Getter<V> = Box<dyn Fn(&dyn Any) -> Result<V, BindingFault> + Send + Sync>;
pub(crate) type Setter<V> = Box<dyn Fn(&mut dyn Any, V) -> Result<(), BindingFault> + Send + Sync>;

fn downcast_ref<T: 'static>(obj: &dyn Any) -> Result<&T, BindingFault> {
    obj.downcast_ref::<T>().ok_or(BindingFault::WrongDomainType)
}

fn downcast_mut<T: 'static>(obj: &mut dyn Any) -> Result<&mut T, BindingFault> {
    obj.downcast_mut::<T>().ok_or(BindingFault::WrongDomainType)
}

fn to_value<P: Serialize>(value: P) -> Result<Value, BindingFault> {
    serde_json::to_value(value).map_err(|e| BindingFault::Conversion(e.to_string()))
}

fn from_value<P: DeserializeOwned>(value: Value) -> Result<P, BindingFault> {
    serde_json::from_value(value).map_err(|e| BindingFault::Conversion(e.to_string()))
}

/// Binding between the wire `id` string and a domain id property
pub struct IdentityBinding {
    property: String,
    property_type: &'static str,
    pub(crate) unset: Option<Value>,
    pub(crate) get: Getter<Value>,
    pub(crate) set: Setter<Value>,
    to_domain: Box<dyn Fn(&str) -> Result<Value, String> + Send + Sync>,
    to_wire: Box<dyn Fn(Value) -> Result<String, String> + Send + Sync>,
}

impl IdentityBinding {
    pub(crate) fn new<T, I, G, S>(property: &str, get: G, set: S) -> Self
    where
        T: 'static,
        I: FromStr + fmt::Display + Serialize + DeserializeOwned + 'static,
        I::Err: fmt::Display,
        G: Fn(&T) -> I + Send + Sync + 'static,
        S: Fn(&mut T, I) + Send + Sync + 'static,
    {
        Self {
            property: property.to_string(),
            property_type: type_name::<I>(),
            unset: None,
            get: Box::new(move |obj: &dyn Any| -> Result<Value, BindingFault> {
                to_value(get(downcast_ref::<T>(obj)?))
            }),
            set: Box::new(move |obj: &mut dyn Any, value: Value| -> Result<(), BindingFault> {
                let id = from_value::<I>(value)?;
                set(downcast_mut::<T>(obj)?, id);
                Ok(())
            }),
            to_domain: Box::new(|wire: &str| -> Result<Value, String> {
                let id = wire.parse::<I>().map_err(|e| e.to_string())?;
                serde_json::to_value(id).map_err(|e| e.to_string())
            }),
            to_wire: Box::new(|value: Value| -> Result<String, String> {
                serde_json::from_value::<I>(value)
                    .map(|id| id.to_string())
                    .map_err(|e| e.to_string())
            }),
        }
    }

    /// Name of the domain id property
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Declared Rust type of the domain id
    pub fn property_type(&self) -> &'static str {
        self.property_type
    }

    /// Convert a wire id string into the domain id value
    pub fn wire_id_to_domain_id(&self, wire: &str) -> Result<Value, String> {
        (self.to_domain)(wire)
    }

    /// Convert a domain id value into the wire id string
    pub fn domain_id_to_wire_id(&self, value: &Value) -> Result<String, String> {
        (self.to_wire)(value.clone())
    }
}

impl fmt::Debug for IdentityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityBinding")
            .field("property", &self.property)
            .field("property_type", &self.property_type)
            .field("unset", &self.unset)
            .finish_non_exhaustive()
    }
}

/// Binding between one API attribute and one domain property
pub struct AttributeBinding {
    api_name: String,
    property: String,
    property_type: &'static str,
    complex: bool,
    pub(crate) get: Getter<Value>,
    pub(crate) set: Setter<Value>,
}

impl AttributeBinding {
    pub(crate) fn new<T, P, G, S>(
        api_name: &str,
        property: &str,
        complex: bool,
        get: G,
        set: S,
    ) -> Self
    where
        T: 'static,
        P: Serialize + DeserializeOwned + 'static,
        G: Fn(&T) -> P + Send + Sync + 'static,
        S: Fn(&mut T, P) + Send + Sync + 'static,
    {
        Self {
            api_name: api_name.to_string(),
            property: property.to_string(),
            property_type: type_name::<P>(),
            complex,
            get: Box::new(move |obj: &dyn Any| -> Result<Value, BindingFault> {
                to_value(get(downcast_ref::<T>(obj)?))
            }),
            set: Box::new(move |obj: &mut dyn Any, value: Value| -> Result<(), BindingFault> {
                let value = from_value::<P>(value)?;
                set(downcast_mut::<T>(obj)?, value);
                Ok(())
            }),
        }
    }

    /// Attribute name on the wire
    pub fn api_name(&self) -> &str {
        &self.api_name
    }

    /// Domain property name
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Declared Rust type of the domain property
    pub fn property_type(&self) -> &'static str {
        self.property_type
    }

    /// Nested object attribute
    pub fn is_complex(&self) -> bool {
        self.complex
    }
}

impl fmt::Debug for AttributeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeBinding")
            .field("api_name", &self.api_name)
            .field("property", &self.property)
            .field("property_type", &self.property_type)
            .field("complex", &self.complex)
            .finish_non_exhaustive()
    }
}

/// Optional domain property holding meta, relationships or links as-is
pub(crate) struct HookBinding<V> {
    pub(crate) get: Getter<Option<V>>,
    pub(crate) set: Setter<V>,
}

impl<V: 'static> HookBinding<V> {
    pub(crate) fn new<T, G, S>(get: G, set: S) -> Self
    where
        T: 'static,
        G: Fn(&T) -> Option<V> + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            get: Box::new(move |obj: &dyn Any| -> Result<Option<V>, BindingFault> {
                Ok(get(downcast_ref::<T>(obj)?))
            }),
            set: Box::new(move |obj: &mut dyn Any, value: V| -> Result<(), BindingFault> {
                set(downcast_mut::<T>(obj)?, value);
                Ok(())
            }),
        }
    }
}
