use std::panic::{catch_unwind, AssertUnwindSafe};

use blob_decode::{
    decode_calendar_date, decode_instant, decode_instant_with, decode_number,
    decode_timestamp_millis, err, is_decode_error, ok, pair, pair_decoder, to_decoder, to_verifier,
    DecodeConfig, Decoder, Fault, ImplausibleInstant, Mode, Rejection, Verdict, Verifier,
};
use chrono::{Local, TimeZone};
use serde_json::{json, Value};

const YEAR_1800_MILLIS: i64 = -5_364_662_400_000;

fn verify_label(blob: &Value) -> Verdict<String> {
    match blob.as_str() {
        Some(s) if !s.is_empty() => ok(s.to_string()),
        Some(_) => err(Rejection::new("must be a non-empty string").with_detail("got an empty string")),
        None => err("must be a string"),
    }
}

#[test]
fn pair_of_label_and_timestamp() {
    let reading = pair(verify_label, to_verifier(decode_timestamp_millis()));

    assert_eq!(
        reading.verify(&json!(["boiler", "2024-01-15T10:30:00Z"])),
        Ok(("boiler".to_string(), 1_705_314_600_000))
    );

    let rejection = reading.verify(&json!(["boiler", "yesterday"])).unwrap_err();
    assert_eq!(rejection.message(), "unexpected value at position 1");
    assert_eq!(rejection.inner().unwrap().message(), "Not a valid date");
}

#[test]
fn pair_surfaces_position_zero_when_both_fail() {
    let reading = pair(verify_label, to_verifier(decode_number()));

    let rejection = reading.verify(&json!(["", "x"])).unwrap_err();

    assert_eq!(rejection.message(), "unexpected value at position 0");
    assert_eq!(rejection.inner().unwrap().detail(), Some("got an empty string"));
}

#[test]
fn pair_decoder_tags_shape_failures() {
    let reading = pair_decoder(to_decoder(verify_label), decode_number());

    let fault = reading.decode(&json!({"label": "x"})).unwrap_err();

    assert!(is_decode_error(&*fault));
    assert_eq!(fault.to_string(), "must be a sequence");
}

#[test]
fn epoch_sentinels_bypass_the_window() {
    let decoder = decode_instant_with(DecodeConfig::development(2026));

    assert!(decoder.decode(&json!(0)).unwrap().is_epoch());
    assert!(decoder.decode(&json!("1970-01-01")).unwrap().is_epoch());
}

#[test]
fn offset_is_kept_and_missing_offset_is_utc() {
    let decoder = decode_instant();

    let with_offset = decoder.decode(&json!("2024-01-15T10:30:00+02:00")).unwrap();
    assert_eq!(with_offset.to_string(), "2024-01-15T10:30:00+02:00");

    let without_offset = decoder.decode(&json!("2024-01-15T10:30:00")).unwrap();
    assert_eq!(without_offset.to_string(), "2024-01-15T10:30:00Z");
}

#[test]
fn not_a_date_is_a_validation_failure() {
    let fault = decode_instant().decode(&json!("not-a-date")).unwrap_err();

    assert!(is_decode_error(&*fault));
    assert!(fault.to_string().starts_with("Not a valid date"));

    let rejection = to_verifier(decode_instant()).verify(&json!("not-a-date")).unwrap_err();
    assert_eq!(rejection.message(), "Not a valid date");
}

#[test]
fn timestamp_millis_equals_instant_millis() {
    let instants = decode_instant();
    let millis = decode_timestamp_millis();

    for blob in [
        json!(1_705_314_600_000_i64),
        json!("2024-01-15T10:30:00+02:00"),
        json!("2024-01-15 10:30:00.250"),
        json!("2030-12-31"),
    ] {
        assert_eq!(millis.decode(&blob).unwrap(), instants.decode(&blob).unwrap().timestamp_millis());
    }
}

#[test]
fn calendar_date_is_a_local_civil_date() {
    let date = decode_calendar_date().decode(&json!("2024-03-01")).unwrap();

    let local_midnight = Local.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).earliest().unwrap();
    assert_eq!(date.timestamp_millis(), local_midnight.timestamp_millis());

    assert!(is_decode_error(
        &*decode_calendar_date().decode(&json!("2024-03-01T10:00:00")).unwrap_err()
    ));
}

#[test]
fn implausible_year_depends_on_mode() {
    let development = decode_instant_with(DecodeConfig::development(2026));
    let production = decode_instant_with(DecodeConfig::new(Mode::Production, 2026));

    let fault = development.decode(&json!(YEAR_1800_MILLIS)).unwrap_err();
    assert!(!is_decode_error(&*fault));
    assert!(fault.downcast_ref::<ImplausibleInstant>().is_some());

    assert_eq!(production.decode(&json!(YEAR_1800_MILLIS)).unwrap().year(), 1800);
}

#[test]
fn implausible_year_is_never_a_rejection() {
    let verifier = to_verifier(decode_instant_with(DecodeConfig::development(2026)));

    let outcome = catch_unwind(AssertUnwindSafe(|| verifier.verify(&json!(YEAR_1800_MILLIS))));

    let payload = outcome.expect_err("defect escapes as a panic");
    let fault = payload.downcast::<Fault>().expect("original fault is the payload");
    assert!(fault.to_string().contains("multiply a Unix timestamp by 1000"));
}

#[test]
fn decoders_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>(_: &T) {}

    let decoder = decode_instant();
    let verifier = pair(verify_label, to_verifier(decode_instant()));
    assert_send_sync(&decoder);
    assert_send_sync(&verifier);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                decoder
                    .decode(&json!(format!("2024-01-1{}T00:00:00Z", i)))
                    .map(|instant| instant.timestamp_millis())
                    .map_err(|fault| fault.to_string())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}
