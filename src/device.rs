// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device information.
//!
//! [`ApiDeviceInfo`] is the record the device-listing API returns for each
//! robot. [`DeviceInfo`] validates it and pairs it with the shared
//! [`StaticDeviceInfo`] of the robot's model.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::capabilities::Capabilities;
use crate::error::{Error, Result};
use crate::hardware::{DataType, HardwareResolver, StaticDeviceInfo};

/// One entry of the device-listing API.
///
/// Every attribute is optional at this level; [`DeviceInfo::new`] enforces
/// the required ones. Unrecognised attributes are kept in `extra`. The
/// identifying attributes also accept JSON numbers, stored in their decimal
/// form.
///
/// # Examples
///
/// ```
/// use deebot_core::ApiDeviceInfo;
///
/// let api: ApiDeviceInfo = serde_json::from_str(
///     r#"{"class": "yna5xi", "did": "E0001", "company": "eco-ng",
///         "name": "E0001", "resource": "res", "nick": "Kitchen", "status": 1}"#,
/// )?;
/// assert_eq!(api.class.as_deref(), Some("yna5xi"));
/// assert_eq!(api.extra["status"], 1);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDeviceInfo {
    /// Device class (model code).
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub class: Option<String>,
    /// Owning company or realm.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    /// Device id.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub did: Option<String>,
    /// Device name as registered with the cloud.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    /// Resource (session) identifier.
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub resource: Option<String>,
    /// Marketing name of the model.
    #[serde(
        default,
        rename = "deviceName",
        skip_serializing_if = "Option::is_none"
    )]
    pub device_name: Option<String>,
    /// Name given by the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    /// Remaining attributes, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A validated device together with its model description.
///
/// The model description is shared: every device of the same class holds
/// the same [`StaticDeviceInfo`].
///
/// # Examples
///
/// ```
/// use deebot_core::{ApiDeviceInfo, DeviceInfo, EventType, HardwareResolver};
///
/// let resolver = HardwareResolver::new()?;
/// let api = ApiDeviceInfo {
///     class: Some("p95mgv".into()),
///     company: Some("eco-ng".into()),
///     did: Some("E0002".into()),
///     name: Some("E0002".into()),
///     resource: Some("a1b2".into()),
///     ..ApiDeviceInfo::default()
/// };
///
/// let device = DeviceInfo::resolve(api, &resolver)?;
/// assert_eq!(device.did(), "E0002");
/// assert_eq!(device.nick(), None);
/// assert!(!device.capabilities().get_refresh_commands(EventType::Battery).is_empty());
/// # Ok::<(), deebot_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    api: ApiDeviceInfo,
    static_info: Arc<StaticDeviceInfo>,
}

impl DeviceInfo {
    /// Validates `api` and pairs it with `static_info`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] naming the first absent required
    /// attribute, checked in the order `class`, `company`, `did`, `name`,
    /// `resource`.
    pub fn new(api: ApiDeviceInfo, static_info: Arc<StaticDeviceInfo>) -> Result<Self> {
        let fields = [
            ("class", &api.class),
            ("company", &api.company),
            ("did", &api.did),
            ("name", &api.name),
            ("resource", &api.resource),
        ];
        if let Some((field, _)) = fields.into_iter().find(|(_, value)| value.is_none()) {
            tracing::warn!(field, did = ?api.did, "Device record is incomplete");
            return Err(Error::MissingField(field));
        }

        Ok(Self { api, static_info })
    }

    /// Resolves the record's class and builds the device info.
    ///
    /// Unknown classes get the fallback model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for an incomplete record, or
    /// [`Error::Config`] if the class's declaration is malformed.
    pub fn resolve(api: ApiDeviceInfo, resolver: &HardwareResolver) -> Result<Self> {
        let class = api.class.as_deref().ok_or(Error::MissingField("class"))?;
        let static_info = resolver.resolve(class)?;
        tracing::debug!(class, did = ?api.did, "Resolved device");
        Self::new(api, static_info)
    }

    /// Returns the record this device was built from.
    #[must_use]
    pub fn api_device_info(&self) -> &ApiDeviceInfo {
        &self.api
    }

    /// Returns the device class.
    #[must_use]
    pub fn class(&self) -> &str {
        required(self.api.class.as_deref())
    }

    /// Returns the owning company.
    #[must_use]
    pub fn company(&self) -> &str {
        required(self.api.company.as_deref())
    }

    /// Returns the device id.
    #[must_use]
    pub fn did(&self) -> &str {
        required(self.api.did.as_deref())
    }

    /// Returns the registered name.
    #[must_use]
    pub fn name(&self) -> &str {
        required(self.api.name.as_deref())
    }

    /// Returns the resource identifier.
    #[must_use]
    pub fn resource(&self) -> &str {
        required(self.api.resource.as_deref())
    }

    /// Returns the model's marketing name, if reported.
    #[must_use]
    pub fn device_name(&self) -> Option<&str> {
        self.api.device_name.as_deref()
    }

    /// Returns the owner-given name, if any.
    #[must_use]
    pub fn nick(&self) -> Option<&str> {
        self.api.nick.as_deref()
    }

    /// Returns the shared model description.
    #[must_use]
    pub fn static_device_info(&self) -> &Arc<StaticDeviceInfo> {
        &self.static_info
    }

    /// Returns the model's payload encoding.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.static_info.data_type()
    }

    /// Returns the model's capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &Capabilities {
        self.static_info.capabilities()
    }
}

// Required fields are checked in `DeviceInfo::new` and the record is never
// mutated afterwards.
fn required(value: Option<&str>) -> &str {
    value.unwrap_or_default()
}

/// Reads an identifying attribute that may arrive as a string or a number.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {other}"
        ))),
    }
}
