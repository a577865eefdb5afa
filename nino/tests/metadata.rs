use nino::{Nino, TypeId};

#[derive(Debug, Nino)]
struct Price {
	#[nino(formatter = "metadata::format_cents")]
	cents: u32,
	currency: String,
}

fn format_cents(cents: u32) -> String {
	format!("{}.{:02}", cents / 100, cents % 100)
}

#[test]
fn formatter_attribute_reaches_the_registered_member_metadata() {
	let id = TypeId::of_fqn("metadata::Price");
	let ty = nino::registry::type_info(id).expect("Price is registered");

	let cents = ty.members.iter().find(|m| m.name == "cents").unwrap();
	assert_eq!(cents.custom_formatter.as_deref(), Some("metadata::format_cents"));

	let currency = ty.members.iter().find(|m| m.name == "currency").unwrap();
	assert_eq!(currency.custom_formatter, None);

	// Confirms the referenced path actually resolves to something callable;
	// the attribute itself is descriptive only and plays no role here.
	assert_eq!(format_cents(1050), "10.50");
}
