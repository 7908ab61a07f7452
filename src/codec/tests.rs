//! Behavioural tests for the copying and direct codec strategies.

use proptest::prelude::*;
use rstest::{fixture, rstest};

use super::{CodecContext, decode_copying, decode_direct, encode_copying, encode_direct};
use crate::message::SampleMessage;

const PAYLOAD_LEN: usize = 512;
const BUFFER_CAPACITY: usize = 2048;
const DEFAULT_SERIALIZED_SIZE: usize = 1037;

#[fixture]
fn ctx() -> CodecContext {
    CodecContext::new(SampleMessage::sequential(PAYLOAD_LEN), BUFFER_CAPACITY)
        .expect("context construction failed")
}

#[rstest]
fn default_message_leaves_slack_in_the_buffer(ctx: CodecContext) {
    assert_eq!(ctx.serialized_size(), DEFAULT_SERIALIZED_SIZE);
    assert_eq!(ctx.target().capacity(), BUFFER_CAPACITY);
    assert_eq!(ctx.expected_len(), PAYLOAD_LEN);
}

#[rstest]
fn direct_round_trip_preserves_content(mut ctx: CodecContext) {
    let written = encode_direct(&mut ctx).expect("encode failed");
    assert_eq!(written, ctx.serialized_size());

    let decoded = decode_direct(&ctx).expect("decode failed");
    assert_eq!(&decoded, ctx.message());
}

#[rstest]
fn copying_round_trip_preserves_content(mut ctx: CodecContext) {
    let written = encode_copying(&mut ctx).expect("encode failed");
    assert_eq!(written, ctx.serialized_size());

    let decoded = decode_copying(&mut ctx).expect("decode failed");
    assert_eq!(&decoded, ctx.message());
}

#[rstest]
fn copying_decode_can_repeat_on_the_same_region(mut ctx: CodecContext) {
    encode_copying(&mut ctx).expect("encode failed");
    for _ in 0..3 {
        let decoded = decode_copying(&mut ctx).expect("decode failed");
        assert_eq!(decoded.len(), PAYLOAD_LEN);
    }
}

#[test]
fn encode_strategies_produce_identical_bytes() {
    let message = SampleMessage::sequential(PAYLOAD_LEN);
    let mut copying = CodecContext::new(message.clone(), BUFFER_CAPACITY).expect("context");
    let mut direct = CodecContext::new(message, BUFFER_CAPACITY).expect("context");

    encode_copying(&mut copying).expect("copying encode failed");
    encode_direct(&mut direct).expect("direct encode failed");

    assert_eq!(copying.target().filled(), direct.target().filled());
}

#[rstest]
fn decode_strategies_agree_on_the_same_region(mut ctx: CodecContext) {
    encode_direct(&mut ctx).expect("encode failed");
    let direct = decode_direct(&ctx).expect("direct decode failed");
    let copying = decode_copying(&mut ctx).expect("copying decode failed");
    assert_eq!(direct, copying);
}

#[rstest]
fn direct_decode_ignores_bytes_past_the_encoding(mut ctx: CodecContext) {
    ctx.target_mut().storage_mut().fill(0xAA);
    encode_direct(&mut ctx).expect("encode failed");

    let decoded = decode_direct(&ctx).expect("decode failed");
    assert_eq!(&decoded, ctx.message());
    assert!(ctx.target().storage()[ctx.serialized_size()..].iter().all(|b| *b == 0xAA));
}

#[rstest]
#[case::exact_fit(0)]
#[case::one_byte_short(1)]
fn capacity_boundary(#[case] shortfall: usize) {
    let message = SampleMessage::sequential(PAYLOAD_LEN);
    let capacity = DEFAULT_SERIALIZED_SIZE - shortfall;

    let mut direct = CodecContext::new(message.clone(), capacity).expect("context");
    let mut copying = CodecContext::new(message, capacity).expect("context");
    let direct_result = encode_direct(&mut direct);
    let copying_result = encode_copying(&mut copying);

    if shortfall == 0 {
        assert_eq!(direct_result.expect("direct encode failed"), capacity);
        assert_eq!(copying_result.expect("copying encode failed"), capacity);
    } else {
        assert!(direct_result.expect_err("direct should not fit").is_capacity());
        assert!(copying_result.expect_err("copying should not fit").is_capacity());
        assert!(direct.target().filled().is_empty());
        assert!(copying.target().filled().is_empty());
    }
}

#[rstest]
fn invalid_leading_byte_fails_both_decodes(mut ctx: CodecContext) {
    encode_direct(&mut ctx).expect("encode failed");
    // 0xFF is not a valid varint discriminant.
    ctx.target_mut().storage_mut()[0] = 0xFF;

    assert!(decode_direct(&ctx).expect_err("direct").is_decoding_format());
    assert!(decode_copying(&mut ctx).expect_err("copying").is_decoding_format());
}

#[rstest]
fn overstated_length_prefix_fails_both_decodes(mut ctx: CodecContext) {
    encode_direct(&mut ctx).expect("encode failed");
    // Length prefix is [251, lo, hi]; 512 becomes 768 elements.
    assert_eq!(&ctx.target().filled()[..3], &[251, 0x00, 0x02]);
    ctx.target_mut().storage_mut()[2] = 0x03;

    assert!(decode_direct(&ctx).expect_err("direct").is_decoding_format());
    assert!(decode_copying(&mut ctx).expect_err("copying").is_decoding_format());
}

#[rstest]
fn understated_length_prefix_fails_both_decodes(mut ctx: CodecContext) {
    encode_direct(&mut ctx).expect("encode failed");
    // 512 becomes 256 elements, leaving the tail of the region unparsed.
    assert_eq!(&ctx.target().filled()[..3], &[251, 0x00, 0x02]);
    ctx.target_mut().storage_mut()[2] = 0x01;

    assert!(decode_direct(&ctx).expect_err("direct").is_decoding_format());
    assert!(decode_copying(&mut ctx).expect_err("copying").is_decoding_format());
}

#[rstest]
#[case::capacity_overflow(1_u64 << 62)]
#[case::terabytes(1_u64 << 40)]
#[case::just_past_limit(1_u64 << 20)]
fn oversized_length_prefix_fails_both_decodes(mut ctx: CodecContext, #[case] declared: u64) {
    encode_direct(&mut ctx).expect("encode failed");
    // 253 introduces a little-endian u64 length.
    let storage = ctx.target_mut().storage_mut();
    storage[0] = 253;
    storage[1..9].copy_from_slice(&declared.to_le_bytes());

    assert!(decode_direct(&ctx).expect_err("direct").is_decoding_format());
    assert!(decode_copying(&mut ctx).expect_err("copying").is_decoding_format());
}

#[rstest]
fn truncated_region_fails_copying_decode(mut ctx: CodecContext) {
    encode_copying(&mut ctx).expect("encode failed");
    let len = ctx.target().filled().len();
    ctx.target_mut().truncate(len - 1);

    assert!(decode_copying(&mut ctx).expect_err("truncated").is_decoding_format());
}

proptest! {
    #[test]
    fn strategies_agree_for_arbitrary_payloads(
        values in proptest::collection::vec(any::<u32>(), 0..256)
    ) {
        let message = SampleMessage::new(values);
        let mut copying = CodecContext::new(message.clone(), BUFFER_CAPACITY).expect("context");
        let mut direct = CodecContext::new(message.clone(), BUFFER_CAPACITY).expect("context");

        encode_copying(&mut copying).expect("copying encode failed");
        encode_direct(&mut direct).expect("direct encode failed");
        prop_assert_eq!(copying.target().filled(), direct.target().filled());

        prop_assert_eq!(decode_direct(&direct).expect("direct decode failed"), message.clone());
        prop_assert_eq!(decode_copying(&mut copying).expect("copying decode failed"), message);
    }
}
