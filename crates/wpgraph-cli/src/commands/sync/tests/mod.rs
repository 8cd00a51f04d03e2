mod tests_summary_line;
