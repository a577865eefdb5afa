//! The byte-level cursor the generated `Serialize` bodies write through.
//!
//! Per spec.md §1 this primitive is an external collaborator whose
//! internals are not specified; what follows is a minimal, direct
//! implementation of the contract the generator needs: host-endian
//! unmanaged writes, a single contiguous bulk-copy path for runs of
//! unmanaged members, collection headers, and the weak-version-tolerance
//! framing envelope.

use std::mem::size_of;

/// Initial buffer capacity. Grown geometrically past this point and never
/// pooled across batches (spec.md §5 "Memory"): large buffers are handed
/// back to the allocator rather than kept warm, to avoid long-tail
/// fragmentation.
const INITIAL_CAPACITY: usize = 256 * 1024;

pub struct Writer {
	buf: Vec<u8>,
}

impl Default for Writer {
	fn default() -> Self {
		Self::new()
	}
}

impl Writer {
	pub fn new() -> Self {
		Writer { buf: Vec::with_capacity(INITIAL_CAPACITY) }
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Writer { buf: Vec::with_capacity(capacity) }
	}

	#[inline]
	pub fn into_bytes(self) -> Vec<u8> {
		self.buf
	}

	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		&self.buf
	}

	#[inline]
	pub fn position(&self) -> usize {
		self.buf.len()
	}

	/// Writes a `Copy` value's raw, host-endian bytes with no padding.
	/// Safety is upheld by the caller only ever instantiating this for
	/// types that are `Unmanaged` (see `nino::codecs::unmanaged`).
	#[inline]
	pub fn write_unmanaged<T: Copy>(&mut self, value: &T) {
		let bytes =
			unsafe { std::slice::from_raw_parts(value as *const T as *const u8, size_of::<T>()) };
		self.buf.extend_from_slice(bytes);
	}

	/// Bulk path for a contiguous homogeneous run of unmanaged values: one
	/// copy for the whole slice instead of one `write_unmanaged` call per
	/// element. This is the fast path `NinoEncode::encode_slice` picks up
	/// for `&[T]`/`Vec<T>` of a single `Unmanaged` type.
	#[inline]
	pub fn write_unmanaged_bulk<T: Copy>(&mut self, values: &[T]) {
		let bytes = unsafe {
			std::slice::from_raw_parts(values.as_ptr() as *const u8, std::mem::size_of_val(values))
		};
		self.buf.extend_from_slice(bytes);
	}

	#[inline]
	pub fn write_bool(&mut self, value: bool) {
		self.buf.push(value as u8);
	}

	#[inline]
	pub fn write_bytes(&mut self, bytes: &[u8]) {
		self.buf.extend_from_slice(bytes);
	}

	/// Writes the 32-bit polymorphic type-id prefix (spec.md §6).
	#[inline]
	pub fn write_type_id(&mut self, id: u32) {
		self.write_unmanaged(&id);
	}

	/// Writes a collection header: either the element count, or the
	/// reserved null sentinel when `len` is `None` (spec.md §4.5).
	#[inline]
	pub fn write_collection_header(&mut self, len: Option<usize>) {
		const NULL_COLLECTION: u32 = u32::MAX;
		let header = match len {
			Some(len) => len as u32,
			None => NULL_COLLECTION,
		};
		self.write_unmanaged(&header);
	}

	/// Default string mode: a 32-bit length prefix followed by UTF-16
	/// code units. (`spec.md` calls for the runtime writer's own
	/// length-prefixed UTF-16 path; this is that path.)
	pub fn write_utf16_string(&mut self, value: &str) {
		let units: Vec<u16> = value.encode_utf16().collect();
		self.write_unmanaged(&(units.len() as u32));
		self.write_unmanaged_bulk(&units);
	}

	/// Member-level UTF-8 opt-in mode: 32-bit length prefix then raw
	/// UTF-8 bytes.
	pub fn write_utf8_string(&mut self, value: &str) {
		self.write_unmanaged(&(value.len() as u32));
		self.write_bytes(value.as_bytes());
	}

	/// Reserves a 4-byte length placeholder, returning a handle that must
	/// be passed to [`Writer::back_patch_frame`] once the framed payload
	/// has been written, per the weak-version-tolerance envelope
	/// (spec.md §6).
	#[cfg(feature = "weak-version-tolerance")]
	pub fn reserve_frame(&mut self) -> FrameHandle {
		let offset = self.buf.len();
		self.write_unmanaged(&0u32);
		FrameHandle(offset)
	}

	#[cfg(feature = "weak-version-tolerance")]
	pub fn back_patch_frame(&mut self, handle: FrameHandle) {
		let payload_len = (self.buf.len() - handle.0 - size_of::<u32>()) as u32;
		self.buf[handle.0..handle.0 + size_of::<u32>()].copy_from_slice(&payload_len.to_ne_bytes());
	}
}

#[cfg(feature = "weak-version-tolerance")]
#[derive(Copy, Clone)]
pub struct FrameHandle(usize);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn collection_header_distinguishes_null_from_empty() {
		let mut empty = Writer::new();
		empty.write_collection_header(Some(0));

		let mut null = Writer::new();
		null.write_collection_header(None);

		assert_ne!(empty.as_bytes(), null.as_bytes());
		assert_eq!(empty.as_bytes(), &0u32.to_ne_bytes());
		assert_eq!(null.as_bytes(), &u32::MAX.to_ne_bytes());
	}

	#[test]
	fn bulk_write_matches_sequential_writes() {
		let values = [1i32, 2, 3, 4];
		let mut bulk = Writer::new();
		bulk.write_unmanaged_bulk(&values);

		let mut sequential = Writer::new();
		for v in &values {
			sequential.write_unmanaged(v);
		}

		assert_eq!(bulk.as_bytes(), sequential.as_bytes());
	}

	#[cfg(feature = "weak-version-tolerance")]
	#[test]
	fn frame_back_patch_records_payload_length() {
		let mut writer = Writer::new();
		let handle = writer.reserve_frame();
		writer.write_bytes(&[1, 2, 3, 4, 5]);
		writer.back_patch_frame(handle);
		assert_eq!(&writer.as_bytes()[0..4], &5u32.to_ne_bytes());
	}
}
