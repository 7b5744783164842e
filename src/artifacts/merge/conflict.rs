use bytes::Bytes;

const HEAD_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR_MARKER: &[u8] = b"=======\n";
const END_MARKER: &[u8] = b">>>>>>>\n";

/// Content written for a file both sides changed differently
///
/// A side that deleted the file contributes empty content. No newline is inserted
/// after either side's content.
pub fn conflict_content(head: Option<&[u8]>, given: Option<&[u8]>) -> Bytes {
    let head = head.unwrap_or_default();
    let given = given.unwrap_or_default();

    let mut content = Vec::with_capacity(
        HEAD_MARKER.len() + head.len() + SEPARATOR_MARKER.len() + given.len() + END_MARKER.len(),
    );
    content.extend_from_slice(HEAD_MARKER);
    content.extend_from_slice(head);
    content.extend_from_slice(SEPARATOR_MARKER);
    content.extend_from_slice(given);
    content.extend_from_slice(END_MARKER);

    Bytes::from(content)
}
