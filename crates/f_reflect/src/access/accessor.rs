use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;

use crate::access::{Keyed, KeyedMut, Subject, SubjectMut};
use crate::error::{AccessError, DuplicateKeyError, TypeCoercionError, WriteError};
use crate::registry::{MemberDescriptor, RecordRegistryArc, TypeDescriptor};
use crate::{FromValue, IntoValue, Mapping, Record, Value};

// -----------------------------------------------------------------------------
// Active registry

std::thread_local! {
    // The registry of the outermost accessor call running on this thread.
    static ACTIVE: RefCell<Option<RecordRegistryArc>> = const { RefCell::new(None) };
}

struct Restore(Option<RecordRegistryArc>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        ACTIVE.with_borrow_mut(|active| *active = previous);
    }
}

// -----------------------------------------------------------------------------
// Accessor

/// Keyed access bound to one [`RecordRegistryArc`].
///
/// The free functions of [`access`](crate::access) use
/// [`Accessor::global`]; construct one with [`Accessor::new`] to keep
/// descriptors in a registry you own.
///
/// # Examples
///
/// ```
/// use f_reflect::derive::Record;
/// use f_reflect::access::Accessor;
/// use f_reflect::registry::RecordRegistryArc;
///
/// #[derive(Record, Default)]
/// struct Player {
///     pub name: String,
///     pub score: u32,
/// }
///
/// let registry = RecordRegistryArc::default();
/// let access = Accessor::new(&registry);
///
/// let mut p = Player::default();
/// assert_eq!(access.set_value("score", 10_u32, &mut p), Ok(true));
/// assert_eq!(access.set_value("missing", 1, &mut p), Ok(false));
/// assert_eq!(access.get_value::<u32>("score", &p), Ok(10));
/// assert_eq!(access.get_keys(&p), ["name", "score"]);
/// assert_eq!(registry.read().len(), 1);
/// ```
#[derive(Clone, Copy)]
pub struct Accessor<'a> {
    registry: &'a RecordRegistryArc,
}

impl Accessor<'static> {
    /// Accessor over [`RecordRegistryArc::global`].
    #[inline]
    pub fn global() -> Self {
        Self::new(RecordRegistryArc::global())
    }

    /// Run `f` with the accessor of the operation in progress on this thread,
    /// or with [`Accessor::global`] outside of one.
    ///
    /// Conversions that recurse into nested records (`#[record(value)]`) go
    /// through this, so they use the same registry as the outer call.
    pub fn with_active<R>(f: impl FnOnce(Accessor<'_>) -> R) -> R {
        match ACTIVE.with_borrow(Clone::clone) {
            Some(registry) => f(Accessor::new(&registry)),
            None => f(Accessor::global()),
        }
    }
}

impl<'a> Accessor<'a> {
    #[inline]
    pub const fn new(registry: &'a RecordRegistryArc) -> Self {
        Self { registry }
    }

    #[inline]
    pub const fn registry(&self) -> &'a RecordRegistryArc {
        self.registry
    }

    // Makes `self.registry` the active one while `f` runs.
    fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        let replaced = ACTIVE.with_borrow_mut(|active| {
            if let Some(current) = active.as_ref()
                && Arc::ptr_eq(&current.internal, &self.registry.internal)
            {
                return None;
            }
            Some(active.replace(self.registry.clone()))
        });
        let _restore = replaced.map(Restore);
        f()
    }

    /// The cached descriptor of the record's concrete type.
    #[inline]
    pub fn describe(&self, record: &dyn Record) -> Arc<TypeDescriptor> {
        self.registry.resolve(record)
    }

    // A failing getter is reported and treated as a missing key.
    fn read_member(
        descriptor: &TypeDescriptor,
        member: &MemberDescriptor,
        record: &dyn Record,
    ) -> Option<Value> {
        let any: &dyn Any = record;
        match member.get(any) {
            Ok(value) => Some(value),
            Err(cause) => {
                let err = AccessError::new(descriptor.type_name(), member.name(), cause);
                log::warn!("{err}");
                None
            }
        }
    }

    fn lookup(&self, key: &str, subject: Subject<'_>) -> Option<Value> {
        match subject {
            Subject::Absent => None,
            Subject::Mapping(mapping) => mapping.get(key).cloned(),
            Subject::Record(record) => {
                let descriptor = self.registry.resolve(record);
                let member = descriptor.member(key)?;
                Self::read_member(&descriptor, member, record)
            }
        }
    }

    /// Read `key` from `subject` as a `T`.
    ///
    /// A missing key, a `null` value or an absent subject yields
    /// `T::default()`. A value of another type is an error.
    pub fn get_value<T>(&self, key: &str, subject: &(impl Keyed + ?Sized)) -> Result<T, TypeCoercionError>
    where
        T: FromValue + Default,
    {
        self.enter(|| match self.lookup(key, subject.subject()) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => T::from_value(value),
        })
    }

    /// Like [`get_value`](Self::get_value), but a value of another type also
    /// yields `T::default()`.
    pub fn get_value_or_default<T>(&self, key: &str, subject: &(impl Keyed + ?Sized)) -> T
    where
        T: FromValue + Default,
    {
        match self.get_value(key, subject) {
            Ok(value) => value,
            Err(err) => {
                log::debug!("`{key}`: {err}, using the default");
                T::default()
            }
        }
    }

    /// Write `value` under `key`, reporting every failure.
    ///
    /// On a record, writes the member named `key`; an unknown key is ignored.
    /// On a mapping, adds the key and fails if it already exists. An absent
    /// subject is ignored.
    ///
    /// Returns `Ok(true)` if something was written.
    pub fn try_set_value(
        &self,
        key: &str,
        value: impl IntoValue,
        subject: &mut (impl KeyedMut + ?Sized),
    ) -> Result<bool, WriteError> {
        self.enter(|| -> Result<bool, WriteError> {
            match subject.subject_mut() {
                SubjectMut::Absent => Ok(false),
                SubjectMut::Mapping(mapping) => {
                    mapping.try_insert(key, value.into_value())?;
                    Ok(true)
                }
                SubjectMut::Record(record) => {
                    let descriptor = self.registry.resolve(&*record);
                    let Some(member) = descriptor.member(key) else {
                        return Ok(false);
                    };
                    let any: &mut dyn Any = record;
                    member
                        .set(any, value.into_value())
                        .map_err(|cause| AccessError::new(descriptor.type_name(), key, cause))?;
                    Ok(true)
                }
            }
        })
    }

    /// Write `value` under `key`.
    ///
    /// Same as [`try_set_value`](Self::try_set_value), except that member
    /// failures (read-only member, wrong value type, failing setter) are
    /// logged with `warn` and leave the subject unchanged.
    pub fn set_value(
        &self,
        key: &str,
        value: impl IntoValue,
        subject: &mut (impl KeyedMut + ?Sized),
    ) -> Result<bool, DuplicateKeyError> {
        match self.try_set_value(key, value, subject) {
            Ok(written) => Ok(written),
            Err(WriteError::Access(err)) => {
                log::warn!("{err}");
                Ok(false)
            }
            Err(WriteError::DuplicateKey(err)) => Err(err),
        }
    }

    /// Member names in descriptor order, or mapping keys in insertion order.
    pub fn get_keys(&self, subject: &(impl Keyed + ?Sized)) -> Vec<String> {
        match subject.subject() {
            Subject::Absent => Vec::new(),
            Subject::Mapping(mapping) => mapping.keys().map(String::from).collect(),
            Subject::Record(record) => self.describe(record).names().map(String::from).collect(),
        }
    }

    /// Values in [`get_keys`](Self::get_keys) order.
    ///
    /// A member whose getter fails contributes [`Value::Null`].
    pub fn get_values(&self, subject: &(impl Keyed + ?Sized)) -> Vec<Value> {
        self.enter(|| match subject.subject() {
            Subject::Absent => Vec::new(),
            Subject::Mapping(mapping) => mapping.values().cloned().collect(),
            Subject::Record(record) => {
                let descriptor = self.describe(record);
                descriptor
                    .members()
                    .iter()
                    .map(|member| Self::read_member(&descriptor, member, record).unwrap_or_default())
                    .collect()
            }
        })
    }

    /// Every key of `subject` with its value.
    pub fn to_mapping(&self, subject: &(impl Keyed + ?Sized)) -> Mapping {
        self.enter(|| match subject.subject() {
            Subject::Absent => Mapping::new(),
            Subject::Mapping(mapping) => mapping.clone(),
            Subject::Record(record) => {
                let descriptor = self.describe(record);
                let mut mapping = Mapping::with_capacity(descriptor.len());
                for member in descriptor.members() {
                    let value = Self::read_member(&descriptor, member, record).unwrap_or_default();
                    mapping.insert(member.name(), value);
                }
                mapping
            }
        })
    }

    /// Build a `T` from the entries of `mapping`.
    ///
    /// Starts from `T::default()` and writes every writable member whose
    /// name is a key of the mapping. Other keys are ignored, and members
    /// that fail to take their value keep the default.
    pub fn from_mapping<T: Record + Default>(&self, mapping: &Mapping) -> T {
        let descriptor = self.registry.resolve_type::<T>();
        let mut target = T::default();
        self.enter(|| {
            for member in descriptor.members() {
                if member.is_read_only() {
                    continue;
                }
                let Some(value) = mapping.get(member.name()) else {
                    continue;
                };
                if let Err(cause) = member.set(&mut target, value.clone()) {
                    log::warn!("{}", AccessError::new(descriptor.type_name(), member.name(), cause));
                }
            }
        });
        target
    }

    /// A new `T` whose writable members are copied from `source`.
    ///
    /// Members holding a [`Value::Shared`] end up sharing the same pointee.
    pub fn shallow_copy<T: Record + Default>(&self, source: &T) -> T {
        let descriptor = self.registry.resolve_type::<T>();
        let mut target = T::default();
        self.enter(|| {
            for member in descriptor.members() {
                if member.is_read_only() {
                    continue;
                }
                let Some(value) = Self::read_member(&descriptor, member, source) else {
                    continue;
                };
                if let Err(cause) = member.set(&mut target, value) {
                    log::warn!("{}", AccessError::new(descriptor.type_name(), member.name(), cause));
                }
            }
        });
        target
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::fmt;

    use super::Accessor;
    use crate::derive::Record;
    use crate::error::{MemberError, WriteError};
    use crate::registry::RecordRegistryArc;
    use crate::{Mapping, Record, Value};

    #[derive(Record, Default, Clone, Debug, PartialEq)]
    #[record(property(name = "A", get = a, set = set_a))]
    struct ObjectC {
        a: i32,
        #[record(rename = "B")]
        pub b: i32,
    }

    impl ObjectC {
        fn a(&self) -> i32 {
            self.a
        }

        fn set_a(&mut self, a: i32) {
            self.a = a;
        }
    }

    #[derive(Record, Default, Clone, Debug, PartialEq)]
    #[record(value)]
    struct Inner {
        pub label: String,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    #[record(property(name = "Ratio", get = ratio, set = set_ratio, fallible))]
    struct Account {
        #[record(readonly)]
        pub id: u32,
        pub owner: Option<String>,
        pub inner: Inner,
        pub tags: Vec<String>,
        pub log: Arc<Vec<u8>>,
        #[record(skip)]
        pub scratch: u8,
        hidden: u8,
        ratio: f64,
    }

    struct RatioError;

    impl fmt::Display for RatioError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("ratio must be in 0..=1")
        }
    }

    impl Account {
        fn ratio(&self) -> Result<f64, RatioError> {
            if self.ratio.is_nan() {
                Err(RatioError)
            } else {
                Ok(self.ratio)
            }
        }

        fn set_ratio(&mut self, ratio: f64) -> Result<(), RatioError> {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(RatioError);
            }
            self.ratio = ratio;
            Ok(())
        }
    }

    fn sample_account() -> Account {
        Account {
            id: 7,
            owner: Some("ada".to_string()),
            inner: Inner {
                label: "main".to_string(),
            },
            tags: vec!["x".to_string(), "y".to_string()],
            log: Arc::new(vec![1, 2]),
            scratch: 3,
            hidden: 4,
            ratio: 0.5,
        }
    }

    #[test]
    fn keys_list_properties_before_fields() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);

        assert_eq!(access.get_keys(&ObjectC::default()), ["A", "B"]);
        assert_eq!(
            access.get_keys(&sample_account()),
            ["Ratio", "id", "owner", "inner", "tags", "log"]
        );
        assert_eq!(registry.read().len(), 2);
    }

    #[test]
    fn mismatched_type_leaves_member_untouched() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let mut obj = ObjectC { a: 1, b: 2 };

        let err = access.try_set_value("B", "x", &mut obj).unwrap_err();
        let WriteError::Access(err) = err else {
            panic!("expected an access error, got {err:?}");
        };
        assert_eq!(err.key, "B");
        assert!(matches!(err.cause, MemberError::Coercion(_)));
        assert_eq!(obj.b, 2);

        assert_eq!(access.set_value("B", "x", &mut obj), Ok(false));
        assert_eq!(access.set_value("A", 5, &mut obj), Ok(true));
        assert_eq!(obj, ObjectC { a: 5, b: 2 });
    }

    #[test]
    fn readonly_member_rejects_writes() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let mut account = sample_account();

        let err = access.try_set_value("id", 9_u32, &mut account).unwrap_err();
        assert!(matches!(
            err,
            WriteError::Access(ref e) if e.cause == MemberError::ReadOnly
        ));
        assert_eq!(account.id, 7);
        assert_eq!(access.get_value::<u32>("id", &account), Ok(7));
    }

    #[test]
    fn missing_keys_and_absent_subjects_read_defaults() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let obj = ObjectC { a: 1, b: 2 };
        let mut none: Option<ObjectC> = None;

        assert_eq!(access.get_value::<String>("missing", &obj), Ok(String::new()));
        assert_eq!(access.get_value::<i32>("A", &none), Ok(0));
        assert_eq!(access.set_value("A", 1, &mut none), Ok(false));
        assert!(access.get_keys(&none).is_empty());
        assert!(access.to_mapping(&none).is_empty());

        let mut account = Account::default();
        assert_eq!(access.get_value::<Option<String>>("owner", &account), Ok(None));
        assert_eq!(access.get_value::<u8>("hidden", &account), Ok(0));
        assert_eq!(access.set_value("hidden", 1_u8, &mut account), Ok(false));
        assert_eq!(access.set_value("scratch", 1_u8, &mut account), Ok(false));
        assert_eq!(account.hidden, 0);
        assert_eq!(account.scratch, 0);
    }

    #[test]
    fn wrong_type_reads_fail_or_default() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let obj = ObjectC { a: 1, b: 2 };

        let err = access.get_value::<String>("A", &obj).unwrap_err();
        assert_eq!(err.found, "int");
        assert_eq!(access.get_value_or_default::<String>("A", &obj), "");
        assert_eq!(access.get_value_or_default::<i64>("A", &obj), 1);
    }

    #[test]
    fn fallible_property_errors_are_contained() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let mut account = sample_account();

        let err = access.try_set_value("Ratio", 2.0, &mut account).unwrap_err();
        assert_eq!(
            err,
            WriteError::Access(crate::error::AccessError {
                type_name: core::any::type_name::<Account>(),
                key: "Ratio".to_string(),
                cause: MemberError::Failed("ratio must be in 0..=1".to_string()),
            })
        );
        assert_eq!(account.ratio, 0.5);

        account.ratio = f64::NAN;
        let values = access.get_values(&account);
        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::UInt(7));
        assert_eq!(access.get_value::<f64>("Ratio", &account), Ok(0.0));
    }

    #[test]
    fn round_trip_through_mapping() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let account = sample_account();

        let mapping = access.to_mapping(&account);
        assert_eq!(mapping.len(), 6);
        assert!(matches!(mapping["inner"], Value::Map(_)));
        assert_eq!(access.get_value::<String>("label", mapping["inner"].as_map().unwrap()), Ok("main".to_string()));

        let back: Account = access.from_mapping(&mapping);
        assert_eq!(back.id, 0);
        assert_eq!(back.owner, account.owner);
        assert_eq!(back.inner, account.inner);
        assert_eq!(back.tags, account.tags);
        assert!(Arc::ptr_eq(&back.log, &account.log));
        assert_eq!(back.ratio, 0.5);
        assert_eq!(back.hidden, 0);

        let obj = ObjectC { a: 3, b: 4 };
        assert_eq!(access.from_mapping::<ObjectC>(&access.to_mapping(&obj)), obj);
    }

    #[test]
    fn from_mapping_ignores_unknown_and_mismatched_keys() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);

        let mapping: Mapping = [
            ("A", Value::from(1)),
            ("B", Value::from("x")),
            ("Z", Value::from(9)),
        ]
        .into_iter()
        .collect();
        assert_eq!(access.from_mapping::<ObjectC>(&mapping), ObjectC { a: 1, b: 0 });
    }

    #[test]
    fn shallow_copy_shares_only_shared_members() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let account = sample_account();

        let mut copy = access.shallow_copy(&account);
        assert!(Arc::ptr_eq(&copy.log, &account.log));
        assert_eq!(copy.tags, account.tags);
        assert_eq!(copy.id, 0);

        copy.tags.push("z".to_string());
        copy.owner = None;
        assert_eq!(account.tags.len(), 2);
        assert_eq!(account.owner.as_deref(), Some("ada"));
    }

    #[test]
    fn mapping_writes_are_add_only() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let mut mapping = Mapping::new();

        assert_eq!(access.set_value("k", 1, &mut mapping), Ok(true));
        let err = access.set_value("k", 2, &mut mapping).unwrap_err();
        assert_eq!(err.key, "k");
        assert_eq!(access.get_value::<i32>("k", &mapping), Ok(1));
        assert_eq!(access.get_keys(&mapping), ["k"]);
        assert_eq!(registry.read().len(), 0);
    }

    #[test]
    fn dyn_records_use_the_concrete_descriptor() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let mut obj = ObjectC { a: 1, b: 2 };

        {
            let record: &mut dyn Record = &mut obj;
            assert_eq!(access.set_value("B", 6, record), Ok(true));
        }
        let record: &dyn Record = &obj;
        assert_eq!(access.get_value::<i32>("B", record), Ok(6));
        assert_eq!(access.get_values(record), [Value::Int(1), Value::Int(6)]);
        assert!(Arc::ptr_eq(
            &access.describe(record),
            &registry.resolve_type::<ObjectC>()
        ));
    }

    #[test]
    fn global_functions_share_one_registry() {
        let obj = ObjectC { a: 1, b: 2 };
        assert_eq!(crate::access::get_value::<i32>("B", &obj), Ok(2));
        assert!(
            RecordRegistryArc::global()
                .read()
                .get_type::<ObjectC>()
                .is_some()
        );
        let merged = crate::access::merge(
            &crate::access::to_mapping(&obj),
            &[("B", 3), ("C", 4)].into_iter().collect(),
        );
        assert_eq!(crate::access::get_keys(&merged), ["A", "B", "C"]);
        assert_eq!(merged["B"], Value::Int(3));
    }

    #[derive(Record, Default, Clone, Debug, PartialEq)]
    #[record(value)]
    struct Part {
        pub code: u16,
    }

    #[derive(Record, Default, Debug, PartialEq)]
    struct Assembly {
        pub part: Part,
    }

    #[test]
    fn nested_records_use_the_calling_registry() {
        let registry = RecordRegistryArc::default();
        let access = Accessor::new(&registry);
        let assembly = Assembly {
            part: Part { code: 12 },
        };

        let mapping = access.to_mapping(&assembly);
        assert!(registry.read().get_type::<Part>().is_some());
        assert_eq!(access.from_mapping::<Assembly>(&mapping), assembly);
        assert_eq!(access.get_value::<Part>("part", &assembly), Ok(Part { code: 12 }));

        let mut copy = Assembly::default();
        assert_eq!(access.set_value("part", Part { code: 3 }, &mut copy), Ok(true));
        assert_eq!(copy.part.code, 3);

        let global = RecordRegistryArc::global().read();
        assert!(global.get_type::<Part>().is_none());
        assert!(global.get_type::<Assembly>().is_none());
    }

    #[test]
    fn active_registry_is_restored_after_a_call() {
        let registry = RecordRegistryArc::default();
        Accessor::new(&registry).to_mapping(&Assembly::default());

        Accessor::with_active(|access| {
            assert!(Arc::ptr_eq(
                &access.registry().internal,
                &RecordRegistryArc::global().internal
            ));
        });
    }
}
