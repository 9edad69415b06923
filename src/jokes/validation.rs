pub fn validate_joke_name(name: &str) -> Result<(), &'static str> {
    if name.chars().count() < 2 {
        return Err("That joke's name is too short");
    }
    Ok(())
}

pub fn validate_joke_content(content: &str) -> Result<(), &'static str> {
    if content.chars().count() < 10 {
        return Err("That joke is too short");
    }
    Ok(())
}
