mod tests_visibility;
