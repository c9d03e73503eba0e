use crate::config::BrowserProfile;

/// Build the argument vector for a profile and a final URL
///
/// The result is `[executable, key<delim>value..., url]`. The executable is
/// not checked here.
pub fn synthesize(profile: &BrowserProfile, final_url: &str) -> Vec<String> {
    let delimiter = profile.delimiter();
    let mut argv = Vec::with_capacity(profile.arguments_list.len() + 2);

    argv.push(profile.executable.clone());
    for (key, value) in profile.arguments_list.iter() {
        let argument = format!("{}{}{}", key, delimiter, value.as_str());
        tracing::debug!("Arguments list element is `{}`", argument);
        argv.push(argument);
    }
    argv.push(final_url.to_string());

    argv
}
