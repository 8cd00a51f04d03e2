mod tests_types;
mod tests_wpscan;
