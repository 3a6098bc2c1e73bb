use mxprovider_lib::{LookupOptions, MxLookup, ProviderRules, resolve};

pub async fn run<L>(domain: &str, lookup: &L, rules: &ProviderRules, options: &LookupOptions)
where
    L: MxLookup + ?Sized,
{
    let mx = resolve(lookup, domain, options).await;
    let provider = rules.classify(&mx);
    println!("domain:   {domain}");
    println!("mx:       {mx}");
    println!(
        "provider: {}",
        if provider.is_empty() { "<unknown>" } else { provider }
    );
}
