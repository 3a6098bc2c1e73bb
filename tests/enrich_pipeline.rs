#![cfg(feature = "with-csv")]

mod common;

use std::time::Duration;

use common::{StubResolver, ZOO_CSV, ZOO_RESULT, provider_zoo};
use mxprovider_lib::{
    Error, LookupOptions, ProviderRule, ProviderRules, enrich_csv, process, read_records,
};
use rand::Rng;

#[tokio::test]
async fn enriches_every_row_in_input_order() {
    let stub = provider_zoo();
    let out = enrich_csv(
        ZOO_CSV.as_bytes(),
        &stub,
        &ProviderRules::default(),
        &LookupOptions::default(),
    )
    .await
    .expect("enrichment succeeds");

    let text = String::from_utf8(out).expect("utf-8 output");
    insta::assert_snapshot!(text.trim_end(), @r"
    name,email,mx,emailprovider
    Ann,ann@corp.example,corp-example.mail.protection.outlook.com,office365
    Bob,bob@gmail.example,smtp.google.com,gsuite
    Cy,cy@fm.example,in1-smtp.messagingengine.com,fastmail
    Di,di@plain.example,mx.plain.example,
    Ed,not-an-email,failed,
    Flo,,failed,
    Gus,gus@broken.example,failed,
    Hal,hal@nomx.example,,
    ");
    // rows without '@' never reach DNS
    assert_eq!(stub.calls(), 6);
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let stub = provider_zoo();
    let rules = ProviderRules::default();
    let options = LookupOptions::default();

    let first = enrich_csv(ZOO_CSV.as_bytes(), &stub, &rules, &options)
        .await
        .unwrap();
    let second = enrich_csv(ZOO_CSV.as_bytes(), &stub, &rules, &options)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, ZOO_RESULT.as_bytes());
}

#[tokio::test]
async fn missing_email_column_fails_before_any_lookup() {
    let stub = provider_zoo();
    let err = enrich_csv(
        b"name,contact\nAnn,ann@corp.example\n",
        &stub,
        &ProviderRules::default(),
        &LookupOptions::default(),
    )
    .await
    .expect_err("no email column");

    assert!(matches!(err, Error::NoEmailColumn));
    assert_eq!(err.to_string(), "No email column found");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn header_only_input_yields_header_only_output() {
    let stub = StubResolver::new();
    let out = enrich_csv(
        b"id,Email Address\n",
        &stub,
        &ProviderRules::default(),
        &LookupOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(out, b"id,Email Address,mx,emailprovider\n");
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn existing_derived_columns_are_overwritten_in_place() {
    let stub = provider_zoo();
    let out = enrich_csv(
        b"mx,email,note\nstale,bob@gmail.example,x\n",
        &stub,
        &ProviderRules::default(),
        &LookupOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "mx,email,note,emailprovider\nsmtp.google.com,bob@gmail.example,x,gsuite\n"
    );
}

#[tokio::test]
async fn custom_rules_are_consulted_after_defaults() {
    let stub = provider_zoo();
    let rules = ProviderRules::default().with_rule(ProviderRule::new("plain.example", "plainmail"));
    let out = enrich_csv(
        b"email\ndi@plain.example\n",
        &stub,
        &rules,
        &LookupOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        out,
        b"email,mx,emailprovider\ndi@plain.example,mx.plain.example,plainmail\n"
    );
}

#[tokio::test(start_paused = true)]
async fn slow_domain_degrades_only_its_own_row() {
    let stub = provider_zoo().with_delay("gmail.example", Duration::from_secs(10));
    let out = enrich_csv(
        b"email\nann@corp.example\nbob@gmail.example\ncy@fm.example\n",
        &stub,
        &ProviderRules::default(),
        &LookupOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "email,mx,emailprovider\n\
         ann@corp.example,corp-example.mail.protection.outlook.com,office365\n\
         bob@gmail.example,failed,\n\
         cy@fm.example,in1-smtp.messagingengine.com,fastmail\n"
    );
}

#[tokio::test(start_paused = true)]
async fn completion_order_never_reorders_rows() {
    let mut rng = rand::thread_rng();
    let mut stub = StubResolver::new();
    let mut csv = String::from("id,email\n");
    let mut expected = Vec::new();
    for i in 0..64 {
        let domain = format!("d{i}.example");
        let host = format!("mx{i}.example.net");
        let delay = Duration::from_millis(rng.gen_range(0..1_500));
        stub = stub
            .with_mx(&domain, &[(10, host.as_str())])
            .with_delay(&domain, delay);
        csv.push_str(&format!("{i},user{i}@{domain}\n"));
        expected.push(host);
    }

    for concurrency in [1, 4, 128] {
        let options = LookupOptions {
            concurrency,
            ..LookupOptions::default()
        };
        let set = read_records(csv.as_bytes()).unwrap();
        let out = process(
            set.records,
            "email",
            &stub,
            &ProviderRules::default(),
            &options,
        )
        .await;

        assert_eq!(out.len(), 64);
        for (i, record) in out.iter().enumerate() {
            assert_eq!(record.get("id"), Some(i.to_string().as_str()));
            assert_eq!(record.get("mx"), Some(expected[i].as_str()));
        }
    }
}
