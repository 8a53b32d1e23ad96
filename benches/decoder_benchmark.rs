use criterion::{Criterion, criterion_group, criterion_main};
use octofhir_hl7v2::{DelimiterSet, MessageDecoder, decode, unescape};
use std::hint::black_box;

const ADT_A01: &str = "MSH|^~\\&|GHH_ADT||||20080115153000||ADT^A01^ADT_A01|0123456789|P|2.5||||AL\r\
EVN||20080115153000||AAA|AAA|20080114003000\r\
PID|1||566-554-3423^^^GHH^MR||EVERYMAN^ADAM^A|||M|||2222 HOME STREET^^ANN ARBOR^MI^^USA||555-555-2004~444-333-222|||M\r\
NK1|1|NUCLEAR^NELDA^W|SPO|2222 HOME STREET^^ANN ARBOR^MI^^USA\r\
PV1|1|I|GHH PATIENT WARD|U||||^SENDER^SAM^^MD|^PUMP^PATRICK^P|CAR||||2|A0|||||||||||||||||||||||||||||2008\r\
IN1|1|HCID-GL^GLOBAL|HCID-23432|HC PAYOR, INC.|5555 INSURERS CIRCLE^^ANN ARBOR^MI^99999^USA||||||||||||||||||||||||||||||||||||||||||||444-33-3333";

fn large_oru(observations: usize) -> String {
    let mut message = String::from(
        "MSH|^~\\&|LAB|HOSP|EHR|HOSP|20240101120000||ORU^R01|MSG0001|P|2.5\r\
         PID|1||12345^^^HOSP^MR||DOE^JANE^Q",
    );
    for i in 1..=observations {
        message.push_str(&format!(
            "\rOBX|{i}|NM|2345-7^Glucose^LN||{}|mg/dL&milligrams per deciliter|70-99|N|||F",
            90 + i % 20
        ));
    }
    message
}

fn benchmark_decode(c: &mut Criterion) {
    c.bench_function("decode_adt_a01", |b| b.iter(|| black_box(decode(black_box(ADT_A01)))));

    let decoder = MessageDecoder::new();
    let large = large_oru(500);
    c.bench_function("decode_oru_500_obx", |b| {
        b.iter(|| black_box(decoder.decode(black_box(&large))))
    });
}

fn benchmark_phases(c: &mut Criterion) {
    let decoder = MessageDecoder::new();
    c.bench_function("discover_delimiters", |b| {
        b.iter(|| black_box(decoder.discover_delimiters(black_box(ADT_A01))))
    });

    let delimiters = DelimiterSet::default();
    let mut group = c.benchmark_group("unescape");
    group.bench_function("plain", |b| {
        b.iter(|| black_box(unescape(black_box("2222 HOME STREET"), &delimiters)))
    });
    group.bench_function("escaped", |b| {
        b.iter(|| black_box(unescape(black_box("Fish \\T\\ Chips \\F\\ Peas"), &delimiters)))
    });
    group.finish();
}

criterion_group!(benches, benchmark_decode, benchmark_phases);
criterion_main!(benches);
