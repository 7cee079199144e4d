use esputnik::{ContactSearch, EsputnikClient, Page};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = EsputnikClient::from_env()?;
    let search = ContactSearch {
        email: std::env::var("ESPUTNIK_EMAIL").ok(),
        ..Default::default()
    };

    let page = client.search_contacts(&search, Page::new(0, 20)).await?;
    println!("{} contacts match", page.total_count);
    for contact in page.contacts {
        println!(
            "{:?} {:?} {:?}",
            contact.id,
            contact.first_name,
            contact.channel(esputnik::Channel::EMAIL)
        );
    }

    Ok(())
}
