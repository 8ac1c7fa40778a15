mod tests_tree;
