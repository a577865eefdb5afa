//! `Array`, `List`/`IList`, `Dictionary` family, `HashSet`, `SortedSet`,
//! `LinkedList`, `ImmutableArray`/`ImmutableList` and `ArraySegment`/
//! `Span` (spec.md §4.5 table). Every collection writes a 32-bit header
//! (spec.md §4.5 "Collection header contract") followed by its elements;
//! `null` and empty are distinguished by the header, never inferred from
//! element count.
//!
//! Each family also gets its own `Option<Collection<T>>` impl so a
//! nullable member of that shape writes/reads the header's own null
//! sentinel directly, rather than stacking `nullable`'s bool tag on top
//! of an otherwise non-nullable collection value.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList};
use std::hash::{BuildHasher, Hash};

use crate::error::{NinoError, NinoResult};
use crate::reader::Reader;
use crate::traits::{NinoDecode, NinoEncode};
use crate::writer::Writer;

impl<T: NinoEncode> NinoEncode for [T] {
	/// `ArraySegment<T>`/`Span<T>`: serialize-only, since a borrowed slice
	/// cannot be the target of a decode (spec.md §4.5 table).
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		T::encode_slice(self, writer);
	}
}

impl<T: NinoEncode, const N: usize> NinoEncode for [T; N] {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(N));
		T::encode_slice(self.as_slice(), writer);
	}
}

impl<T: NinoDecode + Copy, const N: usize> NinoDecode for [T; N] {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null fixed-size array".into()))?;
		if len != N {
			return Err(NinoError::InvalidPayload(format!(
				"expected array of length {N}, found {len}"
			)));
		}
		let values = T::decode_vec(reader, N)?;
		values
			.try_into()
			.map_err(|_| NinoError::InvalidPayload("array length mismatch".into()))
	}
}

impl<T: NinoEncode> NinoEncode for Vec<T> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		T::encode_slice(self, writer);
	}
}

impl<T: NinoDecode> NinoDecode for Vec<T> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null List<T>".into()))?;
		T::decode_vec(reader, len)
	}

	/// "If the existing container is null, allocate; otherwise `Clear`
	/// and refill" (spec.md §4.5 "Mutation semantics").
	fn decode_into(&mut self, reader: &mut Reader) -> NinoResult<()> {
		self.clear();
		*self = Self::decode(reader)?;
		Ok(())
	}
}

/// A nullable `List<T>` folds null into the header above rather than
/// paying for a second bool tag on top of it (`nino::codecs::nullable`'s
/// blanket is only for types with no header of their own).
impl<T: NinoEncode> NinoEncode for Option<Vec<T>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(items) => {
				writer.write_collection_header(Some(items.len()));
				T::encode_slice(items, writer);
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<T: NinoDecode> NinoDecode for Option<Vec<T>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => Ok(Some(T::decode_vec(reader, len)?)),
			None => Ok(None),
		}
	}
}

/// `ImmutableArray<T>`/`ImmutableList<T>`: same wire form as `List<T>`,
/// constructed via the boxed-slice "factory call" on decode.
impl<T: NinoEncode> NinoEncode for Box<[T]> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		T::encode_slice(self, writer);
	}
}

impl<T: NinoDecode> NinoDecode for Box<[T]> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		Ok(Vec::<T>::decode(reader)?.into_boxed_slice())
	}
}

impl<T: NinoEncode> NinoEncode for Option<Box<[T]>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(items) => {
				writer.write_collection_header(Some(items.len()));
				T::encode_slice(items, writer);
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<T: NinoDecode> NinoDecode for Option<Box<[T]>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => Ok(Some(T::decode_vec(reader, len)?.into_boxed_slice())),
			None => Ok(None),
		}
	}
}

impl<T: NinoEncode> NinoEncode for LinkedList<T> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		for item in self {
			item.encode(writer);
		}
	}
}

impl<T: NinoDecode> NinoDecode for LinkedList<T> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null LinkedList<T>".into()))?;
		let mut list = LinkedList::new();
		for _ in 0..len {
			list.push_back(T::decode(reader)?);
		}
		Ok(list)
	}
}

impl<T: NinoEncode> NinoEncode for Option<LinkedList<T>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(list) => {
				writer.write_collection_header(Some(list.len()));
				for item in list {
					item.encode(writer);
				}
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<T: NinoDecode> NinoDecode for Option<LinkedList<T>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => {
				let mut list = LinkedList::new();
				for _ in 0..len {
					list.push_back(T::decode(reader)?);
				}
				Ok(Some(list))
			}
			None => Ok(None),
		}
	}
}

impl<T: NinoEncode + Eq + Hash, S: BuildHasher> NinoEncode for HashSet<T, S> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		for item in self {
			item.encode(writer);
		}
	}
}

impl<T: NinoDecode + Eq + Hash, S: BuildHasher + Default> NinoDecode for HashSet<T, S> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null HashSet<T>".into()))?;
		let mut set = HashSet::with_capacity_and_hasher(len, S::default());
		for _ in 0..len {
			set.insert(T::decode(reader)?);
		}
		Ok(set)
	}
}

impl<T: NinoEncode + Eq + Hash, S: BuildHasher> NinoEncode for Option<HashSet<T, S>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(set) => {
				writer.write_collection_header(Some(set.len()));
				for item in set {
					item.encode(writer);
				}
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<T: NinoDecode + Eq + Hash, S: BuildHasher + Default> NinoDecode for Option<HashSet<T, S>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => {
				let mut set = HashSet::with_capacity_and_hasher(len, S::default());
				for _ in 0..len {
					set.insert(T::decode(reader)?);
				}
				Ok(Some(set))
			}
			None => Ok(None),
		}
	}
}

/// `SortedSet<T>`.
impl<T: NinoEncode + Ord> NinoEncode for BTreeSet<T> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		for item in self {
			item.encode(writer);
		}
	}
}

impl<T: NinoDecode + Ord> NinoDecode for BTreeSet<T> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null SortedSet<T>".into()))?;
		let mut set = BTreeSet::new();
		for _ in 0..len {
			set.insert(T::decode(reader)?);
		}
		Ok(set)
	}
}

impl<T: NinoEncode + Ord> NinoEncode for Option<BTreeSet<T>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(set) => {
				writer.write_collection_header(Some(set.len()));
				for item in set {
					item.encode(writer);
				}
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<T: NinoDecode + Ord> NinoDecode for Option<BTreeSet<T>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => {
				let mut set = BTreeSet::new();
				for _ in 0..len {
					set.insert(T::decode(reader)?);
				}
				Ok(Some(set))
			}
			None => Ok(None),
		}
	}
}

/// `Dictionary`/`ConcurrentDictionary`/`SortedList`/`ReadOnlyDictionary`/
/// `IDictionary`: header then N key-value pairs. An unmanaged key and
/// value pair would, in the source system, take a single bulk copy;
/// `HashMap` entries are never contiguous in memory, so that fast path
/// has no Rust analogue here and every entry is written individually —
/// contiguity is only available (and exploited) for `Vec<(K, V)>`-backed
/// shapes, which is what `BTreeMap`'s ordered iteration approximates for
/// the sorted-dictionary family below.
impl<K: NinoEncode + Eq + Hash, V: NinoEncode, S: BuildHasher> NinoEncode for HashMap<K, V, S> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		for (key, value) in self {
			key.encode(writer);
			value.encode(writer);
		}
	}
}

impl<K: NinoDecode + Eq + Hash, V: NinoDecode, S: BuildHasher + Default> NinoDecode
	for HashMap<K, V, S>
{
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null Dictionary<K, V>".into()))?;
		let mut map = HashMap::with_capacity_and_hasher(len, S::default());
		for _ in 0..len {
			let key = K::decode(reader)?;
			let value = V::decode(reader)?;
			map.insert(key, value);
		}
		Ok(map)
	}
}

impl<K: NinoEncode + Eq + Hash, V: NinoEncode, S: BuildHasher> NinoEncode for Option<HashMap<K, V, S>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(map) => {
				writer.write_collection_header(Some(map.len()));
				for (key, value) in map {
					key.encode(writer);
					value.encode(writer);
				}
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<K: NinoDecode + Eq + Hash, V: NinoDecode, S: BuildHasher + Default> NinoDecode
	for Option<HashMap<K, V, S>>
{
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => {
				let mut map = HashMap::with_capacity_and_hasher(len, S::default());
				for _ in 0..len {
					let key = K::decode(reader)?;
					let value = V::decode(reader)?;
					map.insert(key, value);
				}
				Ok(Some(map))
			}
			None => Ok(None),
		}
	}
}

/// `SortedDictionary<K, V>`/`SortedList<K, V>`.
impl<K: NinoEncode + Ord, V: NinoEncode> NinoEncode for BTreeMap<K, V> {
	fn encode(&self, writer: &mut Writer) {
		writer.write_collection_header(Some(self.len()));
		for (key, value) in self {
			key.encode(writer);
			value.encode(writer);
		}
	}
}

impl<K: NinoDecode + Ord, V: NinoDecode> NinoDecode for BTreeMap<K, V> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		let len = reader
			.read_collection_header()?
			.ok_or_else(|| NinoError::InvalidPayload("null SortedDictionary<K, V>".into()))?;
		let mut map = BTreeMap::new();
		for _ in 0..len {
			let key = K::decode(reader)?;
			let value = V::decode(reader)?;
			map.insert(key, value);
		}
		Ok(map)
	}
}

impl<K: NinoEncode + Ord, V: NinoEncode> NinoEncode for Option<BTreeMap<K, V>> {
	fn encode(&self, writer: &mut Writer) {
		match self {
			Some(map) => {
				writer.write_collection_header(Some(map.len()));
				for (key, value) in map {
					key.encode(writer);
					value.encode(writer);
				}
			}
			None => writer.write_collection_header(None),
		}
	}
}

impl<K: NinoDecode + Ord, V: NinoDecode> NinoDecode for Option<BTreeMap<K, V>> {
	fn decode(reader: &mut Reader) -> NinoResult<Self> {
		match reader.read_collection_header()? {
			Some(len) => {
				let mut map = BTreeMap::new();
				for _ in 0..len {
					let key = K::decode(reader)?;
					let value = V::decode(reader)?;
					map.insert(key, value);
				}
				Ok(Some(map))
			}
			None => Ok(None),
		}
	}
}
