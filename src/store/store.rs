//! Generic entity/group/attribute store ("Ludus").
//!
//! Maps object ids to typed property payloads, group ids to member lists,
//! and group ids to typed attribute payloads with a priority level. The
//! membership index is bidirectional: an object's group list and each
//! group's member list always agree, and that consistency is the store's
//! central invariant.
//!
//! Payload types are generic parameters (`P` per object, `A` per group), so
//! the engine can plug in its own tagged variants while the id/membership
//! layer stays domain-agnostic.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Prefix distinguishing object ids
pub const OBJECT_PREFIX: &str = "u";
/// Prefix distinguishing group ids
pub const GROUP_PREFIX: &str = "g";

const ID_BYTES: usize = 16;

/// Random base58 payload behind a `prefix-` tag
fn encode_id(prefix: &str) -> String {
    let bytes: [u8; ID_BYTES] = rand::random();
    format!("{prefix}-{}", bs58::encode(bytes).into_string())
}

/// True when `id` is `prefix-` followed by a non-empty payload
fn has_prefix(id: &str, prefix: &str) -> bool {
    match id.split_once('-') {
        Some((head, rest)) => head == prefix && !rest.is_empty(),
        None => false,
    }
}

/// Globally unique opaque tag for a stored object
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    fn generate() -> Self {
        Self(encode_id(OBJECT_PREFIX))
    }

    /// Prefix-based classification of a raw id string
    pub fn matches(id: &str) -> bool {
        has_prefix(id, OBJECT_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Globally unique opaque tag for a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    fn generate() -> Self {
        Self(encode_id(GROUP_PREFIX))
    }

    /// Prefix-based classification of a raw id string
    pub fn matches(id: &str) -> bool {
        has_prefix(id, GROUP_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attribute priority level. Groups default to the highest level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    Lowest,
    Level(u64),
    #[default]
    Highest,
}

#[derive(Debug, Clone)]
struct ObjectEntry<P> {
    groups: Vec<GroupId>,
    properties: Option<P>,
}

impl<P> ObjectEntry<P> {
    fn new() -> Self {
        Self {
            groups: Vec::new(),
            properties: None,
        }
    }
}

#[derive(Debug, Clone)]
struct AttributeEntry<A> {
    priority: Priority,
    payload: Option<A>,
}

impl<A> AttributeEntry<A> {
    fn new(priority: Priority) -> Self {
        Self {
            priority,
            payload: None,
        }
    }
}

/// Query-style view of one stored id, classified by prefix
#[derive(Debug)]
pub enum Entry<'a, P> {
    Object {
        groups: &'a [GroupId],
        properties: Option<&'a P>,
    },
    Group {
        members: &'a [ObjectId],
    },
}

/// The store itself. All maps are insertion-ordered so iteration (and
/// anything built on it, like the engine tick) is deterministic
#[derive(Debug, Clone)]
pub struct Ludus<P, A> {
    objects: IndexMap<ObjectId, ObjectEntry<P>>,
    groups: IndexMap<GroupId, Vec<ObjectId>>,
    attributes: IndexMap<GroupId, AttributeEntry<A>>,
}

impl<P, A> Ludus<P, A> {
    pub fn new() -> Self {
        Self {
            objects: IndexMap::new(),
            groups: IndexMap::new(),
            attributes: IndexMap::new(),
        }
    }

    // ---------------------------------------------------------------------
    // Objects
    // ---------------------------------------------------------------------

    /// Register a fresh object with no properties and no memberships
    pub fn new_object(&mut self) -> ObjectId {
        let id = ObjectId::generate();
        self.objects.insert(id.clone(), ObjectEntry::new());
        id
    }

    /// Re-register an object under a caller-supplied id (dump reload path)
    pub(crate) fn adopt_object(&mut self, id: ObjectId) {
        self.objects.entry(id).or_insert_with(ObjectEntry::new);
    }

    pub fn contains_object(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn object_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.keys()
    }

    pub fn properties(&self, id: &ObjectId) -> Option<&P> {
        self.objects.get(id).and_then(|entry| entry.properties.as_ref())
    }

    pub fn properties_mut(&mut self, id: &ObjectId) -> Option<&mut P> {
        self.objects.get_mut(id).and_then(|entry| entry.properties.as_mut())
    }

    /// Attach or replace the property payload of an existing object
    pub fn set_properties(&mut self, id: &ObjectId, properties: P) -> EngineResult<()> {
        let entry = self
            .objects
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownObject(id.clone()))?;
        entry.properties = Some(properties);
        Ok(())
    }

    /// Drop the property payload, keeping the object and its memberships
    pub fn clear_properties(&mut self, id: &ObjectId) -> EngineResult<Option<P>> {
        let entry = self
            .objects
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownObject(id.clone()))?;
        Ok(entry.properties.take())
    }

    /// Groups the object is a member of, in attachment order
    pub fn groups_of(&self, id: &ObjectId) -> Option<&[GroupId]> {
        self.objects.get(id).map(|entry| entry.groups.as_slice())
    }

    /// Remove an object entirely: detach it from every group it belongs
    /// to, and delete any group left empty along with its attributes
    pub fn remove_object(&mut self, id: &ObjectId) -> EngineResult<Option<P>> {
        let entry = self
            .objects
            .shift_remove(id)
            .ok_or_else(|| EngineError::UnknownObject(id.clone()))?;
        for group in &entry.groups {
            self.drop_member(group, id);
        }
        Ok(entry.properties)
    }

    // ---------------------------------------------------------------------
    // Groups and membership
    // ---------------------------------------------------------------------

    /// Register a fresh group at the default (highest) priority level
    pub fn new_group(&mut self) -> GroupId {
        self.new_group_with_priority(Priority::default())
    }

    pub fn new_group_with_priority(&mut self, priority: Priority) -> GroupId {
        let id = GroupId::generate();
        self.attributes.insert(id.clone(), AttributeEntry::new(priority));
        id
    }

    /// Re-register a group under a caller-supplied id (dump reload path)
    pub(crate) fn adopt_group(&mut self, id: GroupId, priority: Priority) {
        self.attributes
            .entry(id)
            .or_insert_with(|| AttributeEntry::new(priority));
    }

    pub fn contains_group(&self, id: &GroupId) -> bool {
        self.attributes.contains_key(id)
    }

    /// Member list of a group; `None` when the group has no members
    pub fn members(&self, id: &GroupId) -> Option<&[ObjectId]> {
        self.groups.get(id).map(|members| members.as_slice())
    }

    /// Groups that currently have members, with their member lists
    pub fn groups(&self) -> impl Iterator<Item = (&GroupId, &[ObjectId])> {
        self.groups.iter().map(|(id, members)| (id, members.as_slice()))
    }

    /// Attach an object to each listed group, updating both directions.
    /// Groups must already be registered; re-attaching is a no-op
    pub fn attach_group(&mut self, id: &ObjectId, groups: &[GroupId]) -> EngineResult<()> {
        if !self.objects.contains_key(id) {
            return Err(EngineError::UnknownObject(id.clone()));
        }
        for group in groups {
            if !self.attributes.contains_key(group) {
                return Err(EngineError::UnknownGroup(group.clone()));
            }
        }
        for group in groups {
            let members = self.groups.entry(group.clone()).or_default();
            if members.contains(id) {
                continue;
            }
            members.push(id.clone());
            self.objects[id].groups.push(group.clone());
        }
        Ok(())
    }

    /// Detach an object from each listed group. Detaching the last member
    /// deletes the group's member list and its attribute entry
    pub fn detach_group(&mut self, id: &ObjectId, groups: &[GroupId]) -> EngineResult<()> {
        if !self.objects.contains_key(id) {
            return Err(EngineError::UnknownObject(id.clone()));
        }
        for group in groups {
            let entry = &mut self.objects[id];
            let position = entry.groups.iter().position(|g| g == group).ok_or_else(|| {
                EngineError::NotAMember {
                    object: id.clone(),
                    group: group.clone(),
                }
            })?;
            entry.groups.remove(position);
            self.drop_member(group, id);
        }
        Ok(())
    }

    /// Remove `id` from the group's member list, deleting the group and
    /// its attributes once empty. The caller has already removed the
    /// inverse edge
    fn drop_member(&mut self, group: &GroupId, id: &ObjectId) {
        if let Some(members) = self.groups.get_mut(group) {
            members.retain(|member| member != id);
            if members.is_empty() {
                self.groups.shift_remove(group);
                self.attributes.shift_remove(group);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Attach or replace a group's attribute payload, creating the
    /// attribute entry at default priority when absent
    pub fn set_attribute(&mut self, id: &GroupId, payload: A) {
        let entry = self
            .attributes
            .entry(id.clone())
            .or_insert_with(|| AttributeEntry::new(Priority::default()));
        entry.payload = Some(payload);
    }

    pub fn attribute(&self, id: &GroupId) -> Option<&A> {
        self.attributes.get(id).and_then(|entry| entry.payload.as_ref())
    }

    pub fn attribute_mut(&mut self, id: &GroupId) -> Option<&mut A> {
        self.attributes.get_mut(id).and_then(|entry| entry.payload.as_mut())
    }

    /// Drop a group's attribute payload, keeping its priority level
    pub fn remove_attribute(&mut self, id: &GroupId) -> EngineResult<Option<A>> {
        let entry = self
            .attributes
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownGroup(id.clone()))?;
        Ok(entry.payload.take())
    }

    /// Reset a group's attributes entirely: payload dropped, priority
    /// back to the default level
    pub fn clear_attributes(&mut self, id: &GroupId) -> EngineResult<Option<A>> {
        let entry = self
            .attributes
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownGroup(id.clone()))?;
        entry.priority = Priority::default();
        Ok(entry.payload.take())
    }

    pub fn priority(&self, id: &GroupId) -> Option<Priority> {
        self.attributes.get(id).map(|entry| entry.priority)
    }

    pub fn set_priority(&mut self, id: &GroupId, priority: Priority) -> EngineResult<()> {
        let entry = self
            .attributes
            .get_mut(id)
            .ok_or_else(|| EngineError::UnknownGroup(id.clone()))?;
        entry.priority = priority;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Projections
    // ---------------------------------------------------------------------

    /// Classify a raw id string by prefix and return the matching view.
    /// Unknown or unclassifiable ids come back as `None`
    pub fn get<'a>(&'a self, id: &str) -> Option<Entry<'a, P>> {
        if ObjectId::matches(id) {
            let key = ObjectId(id.to_owned());
            return self.objects.get(&key).map(|entry| Entry::Object {
                groups: entry.groups.as_slice(),
                properties: entry.properties.as_ref(),
            });
        }
        if GroupId::matches(id) {
            let key = GroupId(id.to_owned());
            return self.groups.get(&key).map(|members| Entry::Group {
                members: members.as_slice(),
            });
        }
        None
    }

    /// Objects ordered by the maximum priority level among their attached
    /// groups' attributes (ascending, stable). Objects with no groups sort
    /// as `Priority::Lowest`
    pub fn by_priority(&self) -> Vec<(&ObjectId, Option<&P>)> {
        let mut items: Vec<_> = self.objects.iter().collect();
        items.sort_by_key(|(_, entry)| {
            entry
                .groups
                .iter()
                .filter_map(|group| self.priority(group))
                .max()
                .unwrap_or(Priority::Lowest)
        });
        items
            .into_iter()
            .map(|(id, entry)| (id, entry.properties.as_ref()))
            .collect()
    }

    /// Iterate attribute payloads in registration order
    pub fn attributes(&self) -> impl Iterator<Item = (&GroupId, &A)> {
        self.attributes
            .iter()
            .filter_map(|(id, entry)| entry.payload.as_ref().map(|payload| (id, payload)))
    }
}

impl<P, A> Default for Ludus<P, A> {
    fn default() -> Self {
        Self::new()
    }
}
